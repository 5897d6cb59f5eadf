//! Application configuration — TOML-based, platform-aware paths.
//!
//! Only the record locations are configurable. The defaults point at the
//! CloudStore keys Windows 10/11 uses for Night Light.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str = "# nightlight configuration\n\n";

/// Registry path (under HKCU) of the on/off state record.
pub const STATE_KEY_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\CloudStore\Store\DefaultAccount\Current\default$windows.data.bluelightreduction.bluelightreductionstate\windows.data.bluelightreduction.bluelightreductionstate";

/// Registry path (under HKCU) of the strength/settings record.
pub const SETTINGS_KEY_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\CloudStore\Store\DefaultAccount\Current\default$windows.data.bluelightreduction.settings\windows.data.bluelightreduction.settings";

/// Value name both records are stored under.
pub const VALUE_NAME: &str = "Data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Registry path of the state record, relative to HKEY_CURRENT_USER.
    #[serde(default = "default_state_key")]
    pub state_key: String,

    /// Registry path of the settings record, relative to HKEY_CURRENT_USER.
    #[serde(default = "default_settings_key")]
    pub settings_key: String,

    /// Value name holding each record. Default: "Data".
    #[serde(default = "default_value_name")]
    pub value_name: String,
}

fn default_state_key() -> String {
    STATE_KEY_PATH.into()
}
fn default_settings_key() -> String {
    SETTINGS_KEY_PATH.into()
}
fn default_value_name() -> String {
    VALUE_NAME.into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            state_key: default_state_key(),
            settings_key: default_settings_key(),
            value_name: default_value_name(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A key path is empty or whitespace-only (`field` names which one).
    EmptyKeyPath { field: &'static str },
    /// A key path starts with a hive name or separator; paths are HKCU-relative.
    AbsoluteKeyPath { field: &'static str, path: String },
    /// The value name is empty.
    EmptyValueName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyKeyPath { field } => write!(f, "{field} cannot be empty"),
            ValidationError::AbsoluteKeyPath { field, path } => write!(
                f,
                "{field} must be relative to HKEY_CURRENT_USER, got \"{path}\""
            ),
            ValidationError::EmptyValueName => write!(f, "value_name cannot be empty"),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join("Nightlight"))
        }
        #[cfg(not(windows))]
        {
            dirs::config_dir().map(|p| p.join("nightlight"))
        }
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed
    /// or fails validation.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => match config.validate() {
                    Ok(()) => (config, vec![]),
                    Err(errors) => {
                        let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                        let warning = format!(
                            "invalid config ({}), using defaults: {}",
                            path.display(),
                            reasons.join("; ")
                        );
                        (Self::default(), vec![warning])
                    }
                },
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Check every field, collecting all problems.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        for (field, path) in [
            ("state_key", &self.state_key),
            ("settings_key", &self.settings_key),
        ] {
            let trimmed = path.trim();
            if trimmed.is_empty() {
                errors.push(ValidationError::EmptyKeyPath { field });
            } else if trimmed.starts_with('\\') || trimmed.to_ascii_uppercase().starts_with("HKEY_")
            {
                errors.push(ValidationError::AbsoluteKeyPath {
                    field,
                    path: path.clone(),
                });
            }
        }
        if self.value_name.trim().is_empty() {
            errors.push(ValidationError::EmptyValueName);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
