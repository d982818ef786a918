//! Configuration file support for the demo caller
//!
//! Every value has a default, so an empty file (or no file) runs the
//! reference sequence: create "original F Name" "Name", capitalize, update
//! the last name to "Brown", then exercise the transparent struct.

use crate::error::{DemoError, DemoResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names used to create the person handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonConfig {
    /// First name passed to `person_new`
    #[serde(default = "default_first_name")]
    pub first_name: String,

    /// Last name passed to `person_new`
    #[serde(default = "default_last_name")]
    pub last_name: String,
}

/// Values applied by the mutation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Last name passed to `person_update_last_name`
    #[serde(default = "default_new_last_name")]
    pub last_name: String,
}

/// Transparent struct demonstration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparentConfig {
    /// Run the `CPerson` part of the sequence
    #[serde(default = "default_transparent_enabled")]
    pub enabled: bool,

    /// First name passed to `cperson_new`
    #[serde(default = "default_transparent_first_name")]
    pub first_name: String,

    /// Last name passed to `cperson_new`
    #[serde(default = "default_transparent_last_name")]
    pub last_name: String,

    /// Value written straight into `CPerson::first_name`
    #[serde(default = "default_replacement_first_name")]
    pub replacement_first_name: String,
}

/// Complete demo configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub person: PersonConfig,

    #[serde(default)]
    pub update: UpdateConfig,

    #[serde(default)]
    pub transparent: TransparentConfig,
}

fn default_first_name() -> String {
    "original F Name".to_string()
}

fn default_last_name() -> String {
    "Name".to_string()
}

fn default_new_last_name() -> String {
    "Brown".to_string()
}

fn default_transparent_enabled() -> bool {
    true
}

fn default_transparent_first_name() -> String {
    "A".to_string()
}

fn default_transparent_last_name() -> String {
    "B".to_string()
}

fn default_replacement_first_name() -> String {
    "C".to_string()
}

impl Default for PersonConfig {
    fn default() -> Self {
        Self {
            first_name: default_first_name(),
            last_name: default_last_name(),
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            last_name: default_new_last_name(),
        }
    }
}

impl Default for TransparentConfig {
    fn default() -> Self {
        Self {
            enabled: default_transparent_enabled(),
            first_name: default_transparent_first_name(),
            last_name: default_transparent_last_name(),
            replacement_first_name: default_replacement_first_name(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> DemoResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DemoError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| DemoError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from file, falling back to defaults if the file is missing
    pub fn load_or_default(path: impl AsRef<Path>) -> DemoResult<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(DemoError::ConfigIo { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> DemoResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| DemoError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }
}
