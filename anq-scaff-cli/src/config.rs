//! Generator configuration
//!
//! Layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `<project>/anq-scaff.toml`
//! 3. `ANQ_SCAFF_*` environment variables
//!
//! Command-line flags are applied on top by the `add` command.
//!
//! ```toml
//! api_version = "v2"
//! column_width = 128
//! template_dir = "scaffold-templates"
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the project root
pub const CONFIG_FILE: &str = "anq-scaff.toml";

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// API version directory under `src/api/`
    pub api_version: String,

    /// Width of every generated string column
    pub column_width: u32,

    /// Directory with `*.rs.hbs` overrides, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            api_version: "v1".to_string(),
            column_width: 255,
            template_dir: None,
        }
    }
}

impl ScaffoldConfig {
    /// Load settings for the project at `project_root`
    ///
    /// # Errors
    ///
    /// Returns an error if `anq-scaff.toml` exists but is invalid, or a value
    /// has the wrong type.
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let config: Self = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(project_root.join(CONFIG_FILE)))
            .merge(Env::prefixed("ANQ_SCAFF_").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Template override directory resolved against `project_root`
    #[must_use]
    pub fn template_dir_in(&self, project_root: &Path) -> Option<PathBuf> {
        self.template_dir.as_ref().map(|dir| project_root.join(dir))
    }
}
