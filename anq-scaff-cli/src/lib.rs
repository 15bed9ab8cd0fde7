//! anq-scaff CLI library
//!
//! Scaffolds unified-action CRUD resources for axum + SeaORM projects built
//! on the `anq-scaff` runtime.

pub mod commands;
pub mod config;
pub mod scaffold;

pub use commands::{add_resource, AddCommand, AddRequest};
pub use config::ScaffoldConfig;
pub use scaffold::{Artifact, ArtifactKind, FileEmitter, ScaffoldError, ScaffoldGenerator};
