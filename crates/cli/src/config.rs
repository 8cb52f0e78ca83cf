//! Configuration file handling.
//!
//! The plan lives in a TOML file under a `[plan]` table. A missing file, or
//! one that cannot be read or parsed, yields the default plan. Within a
//! parsed table each field falls back to its default on its own.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fs, io, path::Path};
use stowage_economics::UserConfig;
use toml::{Table, Value};
use tracing::{debug, warn};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "stowage.toml";

/// Errors reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// IO error reading/writing file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage plan.
    pub plan: UserConfig,
}

impl AppConfig {
    /// Load the configuration from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the configuration from `path`, falling back to defaults.
    ///
    /// Plan fields are read one at a time: a field with the wrong type is
    /// replaced by its default while its valid siblings are kept. An
    /// unreadable or unparseable file yields the default plan.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        let table = match fs::read_to_string(path)
            .map_err(ConfigFileError::from)
            .and_then(|content| Ok(content.parse::<Table>()?))
        {
            Ok(table) => table,
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to load config, using defaults");
                return Self::default();
            }
        };

        let plan = match table.get("plan") {
            None => UserConfig::default(),
            Some(Value::Table(plan)) => plan_from_table(plan),
            Some(_) => {
                warn!(path = %path.display(), "`plan` is not a table, using defaults");
                UserConfig::default()
            }
        };
        Self { plan }
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigFileError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Remove the saved configuration so defaults apply again.
    pub fn reset(path: impl AsRef<Path>) -> Result<(), ConfigFileError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Plan from a `[plan]` table, defaulting each missing or invalid field.
fn plan_from_table(table: &Table) -> UserConfig {
    let mut plan = UserConfig::default();
    read_field(table, "storage_capacity", &mut plan.storage_capacity);
    read_field(table, "persistence_period", &mut plan.persistence_period);
    read_field(table, "min_days_threshold", &mut plan.min_days_threshold);
    read_field(table, "with_cdn", &mut plan.with_cdn);
    plan
}

fn read_field<T: DeserializeOwned>(table: &Table, key: &str, slot: &mut T) {
    let Some(value) = table.get(key) else { return };
    let parsed: Result<T, _> = value.clone().try_into();
    match parsed {
        Ok(parsed) => *slot = parsed,
        Err(err) => warn!(field = key, %err, "invalid plan value, using default"),
    }
}
