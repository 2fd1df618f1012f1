//! Imperium CLI - Command-line interface for growing and inspecting empires.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use imperium::Coord;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Imperium - A terrain-weighted territorial growth simulator
#[derive(Parser, Debug)]
#[command(name = "imperium")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a map file decodes and summarise its terrain
    Validate {
        /// Map text file
        #[arg(required = true)]
        map: PathBuf,

        /// Resource layer file
        #[arg(short, long)]
        resources: Option<PathBuf>,
    },

    /// Place a scenario's empires and grow them
    Grow {
        /// Map text file
        #[arg(required = true)]
        map: PathBuf,

        /// Scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Resource layer file
        #[arg(short, long)]
        resources: Option<PathBuf>,

        /// Number of grow ticks (default: 1)
        #[arg(short, long, default_value = "1")]
        ticks: u32,

        /// Cost-units granted to every empire per tick (default: 100)
        #[arg(short, long, default_value = "100")]
        budget: f64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Write the territory map as a PAM image
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Compute a distance field from one cell
    Distance {
        /// Map text file
        #[arg(required = true)]
        map: PathBuf,

        /// Source column
        #[arg(short, long)]
        x: u32,

        /// Source row
        #[arg(short, long)]
        y: u32,

        /// Scenario JSON file providing empires and defaults
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Use this empire's cost model (requires --scenario)
        #[arg(short, long)]
        empire: Option<u32>,

        /// Distance mapped to the end of the gradient (default: auto)
        #[arg(short, long)]
        max: Option<f64>,

        /// Write the distance field as a PAM image
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a map layer to a PAM image
    Render {
        /// Map text file
        #[arg(required = true)]
        map: PathBuf,

        /// Resource layer file
        #[arg(short, long)]
        resources: Option<PathBuf>,

        /// Layer to render
        #[arg(short, long, default_value = "terrain")]
        layer: cli::Layer,

        /// Output image
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Validate { map, resources } => cli::validate::execute(map, resources),

        Commands::Grow {
            map,
            scenario,
            resources,
            ticks,
            budget,
            format,
            out,
            progress,
        } => cli::grow::execute(map, scenario, resources, ticks, budget, format, out, progress),

        Commands::Distance {
            map,
            x,
            y,
            scenario,
            empire,
            max,
            out,
        } => cli::distance::execute(map, Coord::new(x, y), scenario, empire, max, out),

        Commands::Render {
            map,
            resources,
            layer,
            out,
        } => cli::render::execute(map, resources, layer, out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
