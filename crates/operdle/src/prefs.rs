//! User preferences.

use eyre::Result;
use serde::{Deserialize, Serialize};

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// Format for command output.
#[derive(Serialize, Deserialize, Debug, strum::Display, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// User preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Default output format.
    pub output: OutputFormat,
    /// Whether hints are allowed.
    pub hints: bool,
    /// Whether to print the solution after submitting an answer.
    pub reveal_after_submit: bool,
}
impl Default for Preferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}
impl Preferences {
    /// Loads preferences from the user's preferences file, layered over the
    /// defaults. If loading fails, then the existing file is backed up and
    /// the default preferences are returned.
    pub fn load() -> Self {
        let mut config = config::Config::builder();

        // Load default preferences.
        let default_config_source = config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT);
        config = config.add_source(default_config_source);

        // Load user preferences.
        match user_config_source() {
            Ok(config_source) => config = config.add_source(config_source),
            Err(e) => log::warn!("Error loading user preferences: {e}"),
        }

        config
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                backup_prefs_file();
                Self::default()
            })
    }

    /// Writes the preferences to the user's preferences file.
    pub fn save(&self) -> Result<()> {
        let path = operdle_paths::prefs_file()?;
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }

    /// Serializes the preferences as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }
}

fn user_config_source() -> Result<impl config::Source> {
    Ok(config::File::from(operdle_paths::prefs_file()?).required(false))
}

fn backup_prefs_file() {
    if let Ok(path) = operdle_paths::prefs_file() {
        operdle_paths::move_to_backup_file(&path);
    }
}
