//! Command-line arguments for the `micdesk` binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(about, version)]
pub struct Cli {
    /// Location of the configuration file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read commands from a file instead of standard input
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Start with an empty roster, ignoring microphones listed in the config
    #[arg(long)]
    pub no_seed: bool,
}
