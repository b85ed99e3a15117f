//! Core types and configuration for micdesk.
//!
//! This crate holds the microphone roster and everything it needs, with no
//! dependency on how the roster is presented to an operator.

mod config;
mod error;
mod record;
mod roster;
mod state;

pub use config::{Config, ConfigManager, MicrophoneSeed};
pub use error::{Result, ValidationError};
pub use record::MicrophoneRecord;
pub use roster::{Lookup, Roster, RosterOptions};
pub use state::MicStatus;

/// Application name
pub const APP_NAME: &str = "micdesk";

/// Pretty application name for display
pub const APP_NAME_PRETTY: &str = "Microphone Manager";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";
