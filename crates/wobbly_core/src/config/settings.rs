//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::guess::{DropDuplicate, GuessOptions, GuessThresholds, ThirdNMatch};
use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Recently used locations.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Pattern guessing defaults.
    #[serde(default)]
    pub guess: GuessSettings,

    /// Script generation options.
    #[serde(default)]
    pub script: ScriptSettings,
}

/// Recently used files and folders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    /// Last project opened or saved.
    #[serde(default)]
    pub last_project: String,

    /// Folder of the last source file a project was created from.
    #[serde(default)]
    pub last_input_dir: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Defaults for the pattern guesser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessSettings {
    /// Sections shorter than this are skipped by the project-wide pass.
    #[serde(default = "default_minimum_section_length")]
    pub minimum_section_length: i32,

    /// How the slot before each `nn` pair is matched.
    #[serde(default)]
    pub third_n_match: ThirdNMatch,

    /// Which duplicate gets decimated.
    #[serde(default)]
    pub drop_duplicate: DropDuplicate,

    /// Share of "nc" pairs the dominant position must exceed.
    #[serde(default = "default_min_best_percent")]
    pub min_best_percent: f32,

    /// Lead over the runner-up the dominant position must exceed.
    #[serde(default = "default_min_margin_percent")]
    pub min_margin_percent: f32,
}

fn default_minimum_section_length() -> i32 {
    10
}

fn default_min_best_percent() -> f32 {
    40.0
}

fn default_min_margin_percent() -> f32 {
    10.0
}

impl Default for GuessSettings {
    fn default() -> Self {
        Self {
            minimum_section_length: default_minimum_section_length(),
            third_n_match: ThirdNMatch::default(),
            drop_duplicate: DropDuplicate::default(),
            min_best_percent: default_min_best_percent(),
            min_margin_percent: default_min_margin_percent(),
        }
    }
}

impl GuessSettings {
    /// Guesser options built from these settings.
    pub fn to_options(&self) -> GuessOptions {
        GuessOptions {
            third_n_match: self.third_n_match,
            drop_duplicate: self.drop_duplicate,
            thresholds: GuessThresholds {
                min_best_percent: self.min_best_percent,
                min_margin_percent: self.min_margin_percent,
            },
        }
    }
}

/// Script generation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptSettings {
    /// Draw the crop area in the main display script.
    #[serde(default = "default_true")]
    pub show_crop: bool,

    /// Convert the final script's output to RGB when previewing.
    #[serde(default = "default_true")]
    pub preview_rgb: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            show_crop: true,
            preview_rgb: true,
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Logging,
    Guess,
    Script,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Paths,
        ConfigSection::Logging,
        ConfigSection::Guess,
        ConfigSection::Script,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
            ConfigSection::Guess => "guess",
            ConfigSection::Script => "script",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "Recently used files",
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Guess => "Pattern guessing defaults",
            ConfigSection::Script => "Script generation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[guess]"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("drop_duplicate = \"uglier_per_section\""));
        assert!(toml.contains("level = \"info\""));
    }

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.guess.third_n_match = ThirdNMatch::IfPrettier;
        settings.script.show_crop = false;

        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.guess.third_n_match, ThirdNMatch::IfPrettier);
        assert!(!parsed.script.show_crop);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[guess]\ndrop_duplicate = \"uglier_per_cycle\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.guess.drop_duplicate, DropDuplicate::UglierPerCycle);
        // Defaults applied for missing
        assert_eq!(parsed.guess.minimum_section_length, 10);
        assert!(parsed.script.preview_rgb);
    }

    #[test]
    fn guess_settings_convert_to_options() {
        let mut settings = GuessSettings::default();
        settings.min_best_percent = 55.0;

        let options = settings.to_options();
        assert_eq!(options.drop_duplicate, DropDuplicate::UglierPerSection);
        assert_eq!(options.third_n_match, ThirdNMatch::Never);
        assert_eq!(options.thresholds.min_best_percent, 55.0);
        assert_eq!(options.thresholds.min_margin_percent, 10.0);
    }
}
