//! Resource scaffold generator
//!
//! Turns one [`ResourceSpec`] into the four artifacts of a unified-action
//! resource:
//! - Model (`src/models/<module>.rs`)
//! - Schema (`src/schemas/<module>.rs`)
//! - Service (`src/services/<module>.rs`)
//! - API route (`src/api/<version>/<module>.rs`)
//!
//! Rendering is all-or-nothing: [`ScaffoldGenerator::generate`] returns
//! either all four artifacts or the first error.

use super::error::Result;
use super::fields::ResourceSpec;
use super::names::{self, DerivedNames};
use super::templates::TemplateRegistry;
use crate::config::ScaffoldConfig;
use anq_scaff::action::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use anq_scaff::model::{ID_WIDTH, STATUS_ENABLED};
use serde_json::{json, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// SeaORM entity
    Model,
    /// Request/response shapes
    Schema,
    /// Service layer
    Service,
    /// HTTP route module
    Api,
}

impl ArtifactKind {
    /// All kinds, in generation order
    pub const ALL: [Self; 4] = [Self::Model, Self::Schema, Self::Service, Self::Api];

    /// Name of the template rendering this kind
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Schema => "schema",
            Self::Service => "service",
            Self::Api => "api",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

/// One rendered file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// What the file is
    pub kind: ArtifactKind,
    /// Path relative to the project root
    pub path: PathBuf,
    /// Rendered source
    pub content: String,
    /// Short description for the operator report
    pub description: String,
}

/// Renders the artifacts of one resource
pub struct ScaffoldGenerator {
    spec: ResourceSpec,
    names: DerivedNames,
    column_width: u32,
    templates: TemplateRegistry,
}

impl ScaffoldGenerator {
    /// Create a generator from its parts
    #[must_use]
    pub const fn new(
        spec: ResourceSpec,
        names: DerivedNames,
        column_width: u32,
        templates: TemplateRegistry,
    ) -> Self {
        Self {
            spec,
            names,
            column_width,
            templates,
        }
    }

    /// Create a generator using `config` and its template overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a template override cannot be read or parsed.
    pub fn from_config(
        spec: ResourceSpec,
        api_version: &str,
        config: &ScaffoldConfig,
        project_root: &Path,
    ) -> Result<Self> {
        let names = names::derive(&spec.resource_name, api_version);
        let template_dir = config.template_dir_in(project_root);
        let templates = TemplateRegistry::with_overrides(template_dir.as_deref())?;

        Ok(Self::new(spec, names, config.column_width, templates))
    }

    /// Derived names of the resource
    #[must_use]
    pub const fn names(&self) -> &DerivedNames {
        &self.names
    }

    /// The resource being generated
    #[must_use]
    pub const fn spec(&self) -> &ResourceSpec {
        &self.spec
    }

    /// Render all four artifacts
    ///
    /// # Errors
    ///
    /// Returns the first render error; no partial result is returned.
    pub fn generate(&self) -> Result<Vec<Artifact>> {
        let context = self.context();

        ArtifactKind::ALL
            .iter()
            .map(|&kind| self.render(kind, &context))
            .collect()
    }

    /// Variables visible to every template
    #[must_use]
    pub fn context(&self) -> Value {
        json!({
            "resource_name": self.names.resource_name,
            "module_name": self.names.module_name,
            "class_name": self.names.class_name,
            "table_name": self.spec.table_name,
            "route_path": self.names.route_path,
            "api_version": self.names.api_version,
            "fields": self.spec.fields,
            "column_width": self.column_width,
            "id_width": ID_WIDTH,
            "status_enabled": STATUS_ENABLED,
            "default_page": DEFAULT_PAGE,
            "default_page_size": DEFAULT_PAGE_SIZE,
            "max_page_size": MAX_PAGE_SIZE,
        })
    }

    fn render(&self, kind: ArtifactKind, context: &Value) -> Result<Artifact> {
        let content = self.templates.render(kind.template_name(), context)?;
        let resource = &self.names.resource_name;

        let (path, description) = match kind {
            ArtifactKind::Model => (
                &self.names.model_path,
                format!("SeaORM entity for table {}", self.spec.table_name),
            ),
            ArtifactKind::Schema => (
                &self.names.schema_path,
                format!("Request and response shapes for {resource}"),
            ),
            ArtifactKind::Service => (
                &self.names.service_path,
                format!("Service layer for {resource}"),
            ),
            ArtifactKind::Api => (
                &self.names.api_path,
                format!("Unified action route {}", self.names.route_path),
            ),
        };

        tracing::debug!(kind = %kind, path = %path.display(), bytes = content.len(), "rendered artifact");

        Ok(Artifact {
            kind,
            path: path.clone(),
            content,
            description,
        })
    }
}
