// Re-export from sub-crates
pub use micdesk_core::{
    APP_NAME, APP_NAME_PRETTY, Config, ConfigManager, DEFAULT_LOG_LEVEL, Lookup, MicStatus,
    MicrophoneRecord, MicrophoneSeed, Roster, RosterOptions, ValidationError,
};

// App-specific modules
pub mod cli;
pub mod command;
pub mod console;
pub mod notify;

use anyhow::{Context, Result};

// Version from this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the startup roster, registering the configured microphones in
/// order. A bad seed entry is a configuration mistake and fails startup.
pub fn seeded_roster(config: &Config) -> Result<Roster> {
    let mut roster = Roster::with_options(config.roster_options());
    for seed in &config.microphones {
        roster
            .create(&seed.number.to_string(), &seed.kind)
            .with_context(|| format!("Invalid microphone {} in config", seed.number))?;
    }
    Ok(roster)
}
