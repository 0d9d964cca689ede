//! Command-line interface for RageSim

use clap::Parser;
use std::path::PathBuf;

/// Headless rage scenario runner
#[derive(Parser, Debug)]
#[command(name = "ragesim")]
#[command(about = "Run a scripted rage scenario headlessly")]
#[command(version)]
pub struct Args {
    /// JSON scenario file
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Rage settings file (overrides the scenario's inline settings)
    #[arg(long, value_name = "SETTINGS_FILE")]
    pub settings: Option<PathBuf>,

    /// Output path for the status log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Simulated duration in seconds (overrides the scenario)
    #[arg(long)]
    pub max_duration: Option<f32>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
