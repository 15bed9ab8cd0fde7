//! Runtime configuration
//!
//! Layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`./anq.toml`, or the path given to [`AnqConfig::load_from`])
//! 3. Environment variables prefixed `ANQ_`, `__` for nesting
//!
//! ```toml
//! [snowflake]
//! worker_id = 4
//! datacenter_id = 2
//! ```
//!
//! The same setting from the environment: `ANQ_SNOWFLAKE__WORKER_ID=4`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "anq.toml";

/// Snowflake generator identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeConfig {
    /// Worker id, `0..=31`
    pub worker_id: u64,

    /// Datacenter id, `0..=31`
    pub datacenter_id: u64,
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self {
            worker_id: 1,
            datacenter_id: 1,
        }
    }
}

/// Runtime configuration shared by generated applications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnqConfig {
    /// Snowflake generator settings
    #[serde(default)]
    pub snowflake: SnowflakeConfig,
}

impl AnqConfig {
    /// Load from `./anq.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or a value
    /// has the wrong type.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from a specific file and the environment
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The file contains invalid TOML
    /// - Values fail type conversion
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use anq_scaff::config::AnqConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = AnqConfig::load_from("./config/production.toml")?;
    /// anq_scaff::id::init_from_config(&config.snowflake)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("ANQ_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AnqConfig::default();
        assert_eq!(config.snowflake.worker_id, 1);
        assert_eq!(config.snowflake.datacenter_id, 1);
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let config = AnqConfig::load_from("/nonexistent/path/anq.toml").unwrap();
        assert_eq!(config.snowflake, SnowflakeConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[snowflake]\nworker_id = 9").unwrap();

        let config = AnqConfig::load_from(file.path()).unwrap();
        assert_eq!(config.snowflake.worker_id, 9);
        assert_eq!(config.snowflake.datacenter_id, 1);
    }

    #[test]
    fn test_load_from_invalid_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[snowflake]\nworker_id = \"nine\"").unwrap();

        assert!(AnqConfig::load_from(file.path()).is_err());
    }
}
