use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "trackjets", about = "Cluster tracks into level-one track jets")]
pub struct Opt {
    /// Verbosity level: 'off', 'error', 'warn', 'info', 'debug', 'trace'
    #[arg(short, long, default_value = "info")]
    pub verbosity: String,

    /// Configuration file in JSON format
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use the displaced (extended) preset configuration
    #[arg(long, conflicts_with = "config")]
    pub extended: bool,

    /// Event files in JSON format, each containing a list of events
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
