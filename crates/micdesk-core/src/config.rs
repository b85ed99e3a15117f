//! Configuration management for micdesk.
//!
//! The configuration is read once at startup. It never holds roster state;
//! seed microphones are a description of the pool, registered fresh on
//! every run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{APP_NAME, Lookup, RosterOptions};

/// A microphone to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MicrophoneSeed {
    pub number: u32,
    pub kind: String,
}

/// Configuration structure for the application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// How operators address a microphone in live/return/show
    #[serde(default, skip_serializing_if = "is_default_lookup")]
    pub lookup: Lookup,

    /// Refuse to register a number twice
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique_numbers: bool,

    /// Print the roster after every successful change
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub show_roster_after_change: bool,

    /// Raise desktop notifications for warnings and errors
    #[serde(default, skip_serializing_if = "is_false")]
    pub desktop_notifications: bool,

    /// Prompt shown in interactive sessions
    #[serde(default = "default_prompt", skip_serializing_if = "is_default_prompt")]
    pub prompt: String,

    /// Microphones registered when the console starts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub microphones: Vec<MicrophoneSeed>,
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_default_lookup(v: &Lookup) -> bool {
    *v == Lookup::default()
}

fn default_prompt() -> String {
    "mic> ".to_string()
}

fn is_default_prompt(v: &String) -> bool {
    *v == default_prompt()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: Lookup::default(),
            unique_numbers: false,
            show_roster_after_change: true,
            desktop_notifications: false,
            prompt: default_prompt(),
            microphones: Vec::new(),
        }
    }
}

impl Config {
    /// Roster behaviour derived from this configuration.
    pub fn roster_options(&self) -> RosterOptions {
        RosterOptions {
            lookup: self.lookup,
            unique_numbers: self.unique_numbers,
        }
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager with the default configuration directory.
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Creates a ConfigManager for an explicit file, e.g. from `--config`.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Creates a new ConfigManager with a specified configuration directory.
    #[cfg(test)]
    pub fn with_config_dir<P: AsRef<Path>>(dir: P) -> Self {
        let config_path = dir.as_ref().join(format!("{}.toml", APP_NAME));
        Self { config_path }
    }

    /// Returns the default path to the configuration file.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to retrieve configuration directory")?;
        Ok(config_dir.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Loads the configuration from the config file or returns default.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!(path = ?self.config_path, "no config file, using defaults");
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file at {:?}", self.config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file at {:?}", self.config_path))?;

        Ok(config)
    }

    /// Saves the configuration to the config file.
    pub fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self
            .config_path
            .parent()
            .with_context(|| format!("Failed to get parent directory of {:?}", self.config_path))?;

        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create config directory at {:?}", config_dir))?;

        let serialized =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, serialized)
            .with_context(|| format!("Failed to write config file at {:?}", self.config_path))?;

        Ok(())
    }

    /// Saves `config` only when no file exists yet, so an operator's own
    /// file (comments included) is left alone. Returns whether it wrote.
    pub fn create_if_missing(&self, config: &Config) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }
        self.save(config)?;
        Ok(true)
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lookup, Lookup::Position);
        assert!(!config.unique_numbers);
        assert!(config.show_roster_after_change);
        assert!(!config.desktop_notifications);
        assert_eq!(config.prompt, "mic> ");
        assert!(config.microphones.is_empty());
    }

    #[test]
    fn test_load_default_config() {
        let temp = tempdir().expect("Failed to create temp dir");
        let manager = ConfigManager::with_config_dir(temp.path());
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_config_serializes_empty() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(serialized.trim().is_empty(), "got {serialized:?}");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = tempdir().expect("Failed to create temp dir");
        let manager = ConfigManager::with_config_dir(temp.path().join("nested"));

        let config = Config {
            lookup: Lookup::Number,
            unique_numbers: true,
            microphones: vec![MicrophoneSeed {
                number: 1,
                kind: "wireless".to_string(),
            }],
            ..Default::default()
        };
        manager.save(&config).unwrap();
        assert!(manager.config_path().exists());

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.roster_options(),
            RosterOptions {
                lookup: Lookup::Number,
                unique_numbers: true,
            }
        );
    }

    #[test]
    fn test_parse_handwritten_config() {
        let temp = tempdir().expect("Failed to create temp dir");
        let manager = ConfigManager::with_path(temp.path().join("custom.toml"));
        fs::write(
            manager.config_path(),
            r#"
lookup = "number"
prompt = "> "

[[microphones]]
number = 3
kind = "lavalier"

[[microphones]]
number = 8
kind = "handheld"
"#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.lookup, Lookup::Number);
        assert_eq!(config.prompt, "> ");
        assert!(config.show_roster_after_change);
        assert_eq!(config.microphones.len(), 2);
        assert_eq!(config.microphones[1].kind, "handheld");
    }

    #[test]
    fn test_create_if_missing_keeps_existing_file() {
        let temp = tempdir().expect("Failed to create temp dir");
        let manager = ConfigManager::with_config_dir(temp.path());
        let handwritten = "\
# front of house pool
lookup = \"position\" # explicit

# registered on every start
[[microphones]]
number = 1
kind = \"wireless\"
";
        fs::write(manager.config_path(), handwritten).unwrap();

        let config = manager.load().unwrap();
        assert!(!manager.create_if_missing(&config).unwrap());
        assert_eq!(fs::read_to_string(manager.config_path()).unwrap(), handwritten);
    }

    #[test]
    fn test_create_if_missing_writes_defaults() {
        let temp = tempdir().expect("Failed to create temp dir");
        let manager = ConfigManager::with_config_dir(temp.path().join("fresh"));

        assert!(manager.create_if_missing(&Config::default()).unwrap());
        assert!(manager.config_path().exists());
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = tempdir().expect("Failed to create temp dir");
        let manager = ConfigManager::with_config_dir(temp.path());
        fs::write(manager.config_path(), "lookup = \"sideways\"\n").unwrap();
        assert!(manager.load().is_err());
    }
}
