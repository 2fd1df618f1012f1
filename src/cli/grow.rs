//! Grow command implementation.

use std::path::PathBuf;
use std::time::Instant;

use imperium::Scenario;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::output::{GrowTotals, JsonGrowResult, format_text};
use super::{CliError, OutputFormat, open_session, write_image};

/// Execute the grow command.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded, a capital cannot be
/// placed, or the output cannot be written.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    map: PathBuf,
    scenario: PathBuf,
    resources: Option<PathBuf>,
    ticks: u32,
    budget: f64,
    format: OutputFormat,
    out: Option<PathBuf>,
    progress: bool,
) -> Result<(), CliError> {
    let scenario = Scenario::from_file(&scenario)?;
    let mut session = open_session(&map, resources.as_deref(), scenario.config)?;
    session.apply_scenario(&scenario)?;

    let pb = if progress {
        let pb = ProgressBar::new(u64::from(ticks));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ticks ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let mut totals = GrowTotals {
        ticks,
        budget,
        ..GrowTotals::default()
    };
    for _ in 0..ticks {
        let report = session.grow(budget);
        totals.record(&report);
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    info!(
        target: "imperium::cli",
        ticks,
        claimed = totals.claimed,
        elapsed_ms = start.elapsed().as_millis(),
        "growth finished"
    );

    let result = JsonGrowResult::from_session(&session, &totals);
    match format {
        OutputFormat::Text => print!("{}", format_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(path) = out {
        let mut image = session.render_terrain();
        image.overlay(&session.render_ownership());
        imperium::render::overlay_capitals(&mut image, &session.capital_markers());
        write_image(&path, &image)?;
        if format == OutputFormat::Text {
            println!();
            println!("Image saved to: {}", path.display());
        }
    }

    Ok(())
}
