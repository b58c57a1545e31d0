use crate::config::BuildMode;
use clap::Parser;
use std::path::PathBuf;

/// Runs boolean template test scripts against a prebuilt renderer
#[derive(Parser, Debug)]
#[command(name = "j2check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Which build of the subject to run: debug or release
    #[arg(long, default_value = "debug")]
    pub mode: BuildMode,

    /// Run a single test script instead of the whole suite
    #[arg(long)]
    pub test: Option<PathBuf>,

    /// Path to the subject binary (overrides --mode)
    #[arg(long)]
    pub subject: Option<PathBuf>,

    /// Config file to load instead of ./j2check.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// List discovered tests and their fixtures without running them
    #[arg(long, conflicts_with = "test")]
    pub list: bool,
}
