//! Distance command implementation.

use std::path::PathBuf;

use imperium::{Coord, DistanceScale, Scenario, SimConfig};

use super::{CliError, open_session, write_image};

/// Execute the distance command.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded, the empire is unknown,
/// or the image cannot be written.
pub(crate) fn execute(
    map: PathBuf,
    source: Coord,
    scenario: Option<PathBuf>,
    empire: Option<u32>,
    max: Option<f64>,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let scenario = scenario
        .map(|path| Scenario::from_file(&path))
        .transpose()?;
    let config = scenario
        .as_ref()
        .map_or_else(SimConfig::default, |s| s.config);

    let mut session = open_session(&map, None, config)?;
    if let Some(ref scenario) = scenario {
        session.apply_scenario(scenario)?;
    }

    let field = session.compute_distance(source, empire, None)?;
    let reachable = field.distances().iter().filter(|d| d.is_finite()).count();
    let source = field.source();

    println!("Distance field from ({}, {})", source.x, source.y);
    if let Some(id) = empire {
        println!("  Costs:      empire {id}");
    } else {
        println!("  Costs:      default table");
    }
    println!("  Reachable:  {reachable}/{}", field.distances().len());
    if let Some(farthest) = field.max_finite() {
        println!("  Farthest:   {farthest}");
    }

    if let Some(path) = out {
        let scale = max.map_or(DistanceScale::Auto, DistanceScale::Max);
        if let Some(image) = session.render_distance(scale) {
            write_image(&path, &image)?;
            println!();
            println!("Image saved to: {}", path.display());
        }
    }

    Ok(())
}
