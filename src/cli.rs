//! CLI command implementations for Imperium.

pub(crate) mod distance;
pub(crate) mod grow;
pub(crate) mod render;
pub(crate) mod validate;

mod output;

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use imperium::{
    DecodeError, PixelBuffer, ScenarioError, Session, SimConfig, SimError, UnknownEmpireError,
};
use thiserror::Error;

/// Output format for the `grow` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Layer selection for the `render` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Layer {
    /// Terrain colours.
    Terrain,
    /// Resource markers over terrain.
    Resources,
}

/// CLI error type.
#[derive(Debug, Error)]
#[error("{message}")]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<DecodeError> for CliError {
    fn from(e: DecodeError) -> Self {
        Self::new(format!("invalid map: {e}"))
    }
}

impl From<SimError> for CliError {
    fn from(e: SimError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<UnknownEmpireError> for CliError {
    fn from(e: UnknownEmpireError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ScenarioError> for CliError {
    fn from(e: ScenarioError) -> Self {
        Self::new(e.to_string())
    }
}

/// Read a text file, naming the path on failure.
fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))
}

/// Open a session on a map file, with an optional resource layer.
fn open_session(
    map: &Path,
    resources: Option<&Path>,
    config: SimConfig,
) -> Result<Session, CliError> {
    let mut session = Session::with_config(&read_text(map)?, config)?;
    if let Some(path) = resources {
        session.load_resources(&read_text(path)?)?;
    }
    Ok(session)
}

/// Write a buffer as a PAM image.
fn write_image(path: &Path, buffer: &PixelBuffer) -> Result<(), CliError> {
    let file = fs::File::create(path)
        .map_err(|e| CliError::new(format!("Failed to create {}: {e}", path.display())))?;
    buffer.write_pam(std::io::BufWriter::new(file))?;
    Ok(())
}
