//! Unified-action resource scaffolding
//!
//! Raw input flows one way: field line -> [`ResourceSpec`] -> four rendered
//! [`Artifact`]s -> disk. Nothing reads previously generated files back.

pub mod emitter;
pub mod error;
pub mod fields;
pub mod generator;
pub mod names;
pub mod templates;

pub use emitter::FileEmitter;
pub use error::ScaffoldError;
pub use fields::{normalize, ResourceSpec};
pub use generator::{Artifact, ArtifactKind, ScaffoldGenerator};
pub use names::{derive, validate_api_version, validate_resource_name, DerivedNames};
pub use templates::TemplateRegistry;
