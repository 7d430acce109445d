//! Editor configuration.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults for everything missing from the file
//!
//! # Example
//!
//! ```no_run
//! use wobbly_core::config::{ConfigManager, ConfigSection};
//! use wobbly_core::guess::ThirdNMatch;
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/wobbly.toml");
//! config.load_or_create().unwrap();
//!
//! // Options for the pattern guesser
//! let options = config.settings().guess.to_options();
//! println!("Dropping: {:?}", options.drop_duplicate);
//!
//! // Modify a setting and save just that section atomically
//! config.settings_mut().guess.third_n_match = ThirdNMatch::IfPrettier;
//! config.update_section(ConfigSection::Guess).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, GuessSettings, LoggingSettings, PathSettings, ScriptSettings, Settings,
};
