//! Persisted settings — split direction, pairing policy, placeholder keys.
//!
//! Stored as TOML. Every field has a default, so a partial (or missing) file
//! loads cleanly:
//!
//! ```toml
//! direction = "vertical"
//! pairing = "named"
//! left_file = "witte-en.md"
//! right_file = "witte-cn.md"
//! ```
//!
//! | Key                 | Type                                  | Default        |
//! |---------------------|---------------------------------------|----------------|
//! | `translate_api_key` | string                                | `""`           |
//! | `pdf_api_key`       | string                                | `""`           |
//! | `direction`         | `horizontal` \| `vertical`            | `vertical`     |
//! | `close_other`       | bool                                  | `true`         |
//! | `pairing`           | `named` \| `convention` \| `first-two`| `named`        |
//! | `left_file`         | string                                | `witte-en.md`  |
//! | `right_file`        | string                                | `witte-cn.md`  |
//! | `left_suffix`       | string                                | `-en`          |
//! | `right_suffix`      | string                                | `-cn`          |
//!
//! The two API keys are placeholders for translation and PDF conversion
//! services; nothing reads them yet. `close_other` is kept for file
//! compatibility and is not acted on.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::assign::PairingPolicy;
use crate::host::SplitDirection;

/// Errors loading, saving, or editing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown setting `{0}`")]
    UnknownKey(String),

    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Which [`PairingPolicy`] the settings select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingMode {
    #[default]
    Named,
    Convention,
    FirstTwo,
}

impl fmt::Display for PairingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named => f.write_str("named"),
            Self::Convention => f.write_str("convention"),
            Self::FirstTwo => f.write_str("first-two"),
        }
    }
}

/// The settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub translate_api_key: String,
    pub pdf_api_key: String,
    pub direction: SplitDirection,
    pub close_other: bool,
    pub pairing: PairingMode,
    pub left_file: String,
    pub right_file: String,
    pub left_suffix: String,
    pub right_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translate_api_key: String::new(),
            pdf_api_key: String::new(),
            direction: SplitDirection::Vertical,
            close_other: true,
            pairing: PairingMode::Named,
            left_file: "witte-en.md".to_string(),
            right_file: "witte-cn.md".to_string(),
            left_suffix: "-en".to_string(),
            right_suffix: "-cn".to_string(),
        }
    }
}

/// One row of the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingField {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

impl Settings {
    /// The pairing policy these settings select.
    #[must_use]
    pub fn pairing_policy(&self) -> PairingPolicy {
        match self.pairing {
            PairingMode::Named => PairingPolicy::Named {
                left: self.left_file.clone(),
                right: self.right_file.clone(),
            },
            PairingMode::Convention => PairingPolicy::Convention {
                left_suffix: self.left_suffix.clone(),
                right_suffix: self.right_suffix.clone(),
            },
            PairingMode::FirstTwo => PairingPolicy::FirstTwo,
        }
    }

    /// The fields shown in the settings form.
    #[must_use]
    pub fn form(&self) -> Vec<SettingField> {
        vec![
            SettingField {
                key: "translate_api_key",
                name: "Translation API key",
                description: "Used for machine translation",
                placeholder: "Enter your secret API key",
                value: self.translate_api_key.clone(),
            },
            SettingField {
                key: "pdf_api_key",
                name: "PDF to Markdown API key",
                description: "Used to convert PDFs to Markdown",
                placeholder: "Enter your secret API key",
                value: self.pdf_api_key.clone(),
            },
        ]
    }

    /// Set one field from its textual form.
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnknownKey`] for an unrecognised key and
    /// [`SettingsError::InvalidValue`] when the value does not parse.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "translate_api_key" => self.translate_api_key = value.to_string(),
            "pdf_api_key" => self.pdf_api_key = value.to_string(),
            "direction" => self.direction = value.parse().map_err(|_| invalid())?,
            "close_other" => self.close_other = value.parse().map_err(|_| invalid())?,
            "pairing" => {
                self.pairing = match value {
                    "named" => PairingMode::Named,
                    "convention" => PairingMode::Convention,
                    "first-two" => PairingMode::FirstTwo,
                    _ => return Err(invalid()),
                };
            }
            "left_file" => self.left_file = value.to_string(),
            "right_file" => self.right_file = value.to_string(),
            "left_suffix" => self.left_suffix = value.to_string(),
            "right_suffix" => self.right_suffix = value.to_string(),
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Default location: `<config dir>/parallax/settings.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("parallax").join("settings.toml"))
    }

    /// Load settings from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        // The file may hold API keys.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = fs::metadata(path) {
                let mode = metadata.permissions().mode();
                if mode & 0o044 != 0 {
                    warn!(
                        path = %path.display(),
                        mode = %format!("{:04o}", mode & 0o777),
                        "settings file is readable by group or others"
                    );
                }
            }
        }

        let contents = fs::read_to_string(path)?;
        let settings = toml::from_str(&contents)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories.
    ///
    /// Writes a temporary file next to the target and renames it over, so a
    /// crash never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Fails on any I/O or serialization error.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        let temp = path.with_extension("toml.tmp");
        fs::write(&temp, text)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(&temp, path)?;
        Ok(())
    }
}
