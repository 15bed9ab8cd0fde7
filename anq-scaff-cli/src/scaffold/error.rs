//! Scaffold errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating a resource
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The resource name is not usable
    #[error("invalid resource name '{name}': {reason}")]
    InvalidName {
        /// Name as given
        name: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// The API version is not of the form `v<digits>`
    #[error("invalid API version '{0}': expected v<number>, e.g. v1")]
    InvalidVersion(String),

    /// The field list is empty after normalisation
    #[error("at least one business field must be specified")]
    NoFields,

    /// The target directory has no `Cargo.toml`
    #[error("{} is not a Cargo project (no Cargo.toml found)", .0.display())]
    NotAProject(PathBuf),

    /// A template failed to parse
    #[error("failed to load {name} template")]
    Template {
        /// Template name
        name: String,
        /// Parse error
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template failed to render
    #[error("failed to render {name} template")]
    Render {
        /// Template name
        name: String,
        /// Render error
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// A filesystem operation failed
    #[error("failed to write {}", path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for scaffold results
pub type Result<T> = std::result::Result<T, ScaffoldError>;
