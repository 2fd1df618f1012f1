//! Render command implementation.

use std::path::PathBuf;

use imperium::SimConfig;

use super::{CliError, Layer, open_session, write_image};

/// Execute the render command.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded or the image cannot be
/// written.
pub(crate) fn execute(
    map: PathBuf,
    resources: Option<PathBuf>,
    layer: Layer,
    out: PathBuf,
) -> Result<(), CliError> {
    let session = open_session(&map, resources.as_deref(), SimConfig::default())?;

    let mut image = session.render_terrain();
    if layer == Layer::Resources {
        image.overlay(&session.render_resources());
    }
    write_image(&out, &image)?;

    println!(
        "Rendered {}x{} {layer:?} layer to {}",
        image.width(),
        image.height(),
        out.display()
    );
    Ok(())
}
