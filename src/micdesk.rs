use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use micdesk::cli::Cli;
use micdesk::console::{Console, ConsoleOptions};
use micdesk::notify::NotificationLayer;
use micdesk::{
    APP_NAME_PRETTY, ConfigManager, DEFAULT_LOG_LEVEL, Lookup, Roster, VERSION, seeded_roster,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let config = config_manager.load()?;

    // Initialize the logger. Logs go to stderr so they never interleave
    // with the roster listing on stdout. The env filter only applies to the
    // log output; notifications see rejected commands at any level.
    let log_filter = EnvFilter::try_from_env("MICDESK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_filter(log_filter))
        .with(config.desktop_notifications.then(NotificationLayer::new))
        .init();

    // Write a default config the first time, never over an existing file
    if config_manager.create_if_missing(&config)? {
        info!(path = ?config_manager.config_path(), "created config file");
    }
    info!(path = ?config_manager.config_path(), lookup = ?config.lookup, "config loaded");
    if config.lookup == Lookup::Number && !config.unique_numbers {
        warn!(
            "Lookup by number is enabled but duplicate numbers are allowed. \
             Commands will act on the first microphone with a given number."
        );
    }

    let roster = if cli.no_seed {
        Roster::with_options(config.roster_options())
    } else {
        seeded_roster(&config)?
    };

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script at {:?}", path))?;
            let options = ConsoleOptions::from_config(&config, false);
            let mut console = Console::new(roster, options, io::stdout().lock());
            console.run(BufReader::new(file))?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let options = ConsoleOptions::from_config(&config, interactive);
            if interactive {
                println!("{} {} - type 'help' for commands", APP_NAME_PRETTY, VERSION);
            }
            let mut console = Console::new(roster, options, io::stdout().lock());
            if interactive {
                console.print_roster()?;
            }
            console.run(stdin.lock())?;
        }
    }

    info!("{} closed", APP_NAME_PRETTY);
    Ok(())
}
