//! Command Line Interface (CLI) arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// How the dashboard is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Native window.
    Desktop,
    /// JSON API for a browser front end.
    Web,
}

/// Launch records dashboard command line interface
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct CommandLineArgs {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(long, default_value = "spacex_launch_dash.csv", env = "LAUNCH_DASH_DATA")]
    pub data: PathBuf,
    /// JSON file overriding the default source column names
    #[arg(long, env = "LAUNCH_DASH_COLUMNS")]
    pub columns: Option<PathBuf>,
    /// Present the dashboard as a native window or serve it over HTTP
    #[arg(long, value_enum, default_value_t = Mode::Desktop, env = "LAUNCH_DASH_MODE")]
    pub mode: Mode,
    /// The IP address on which the web server should listen
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: String,
    /// The port to which the web server should bind
    #[arg(long, default_value_t = 8050, env = "PORT")]
    pub port: u16,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
