//! `anq-scaff add`: scaffold one unified-action resource
//!
//! Generates four files under the project root:
//! - `src/models/<name>.rs`
//! - `src/schemas/<name>.rs`
//! - `src/services/<name>.rs`
//! - `src/api/<version>/<name>.rs`
//!
//! # Example
//!
//! ```bash
//! anq-scaff add user --table users --fields name,email,phone
//! ```

use crate::config::ScaffoldConfig;
use crate::scaffold::{
    normalize, validate_api_version, validate_resource_name, DerivedNames, FileEmitter,
    ResourceSpec, ScaffoldError, ScaffoldGenerator,
};
use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;
use std::path::{Path, PathBuf};

/// Fully collected input of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    /// Resource name
    pub name: String,
    /// Table name, empty for the resource name
    pub table: String,
    /// Comma-separated field line
    pub fields: String,
    /// API version, `None` for the configured default
    pub api_version: Option<String>,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// Names derived for the resource
    pub names: DerivedNames,
    /// Files written, with descriptions, in generation order
    pub written: Vec<(PathBuf, String)>,
}

/// Generate and write a resource without any interaction
///
/// Every artifact is rendered before the first file is written.
///
/// # Errors
///
/// Returns an error wrapping a [`ScaffoldError`] if the project root has no
/// `Cargo.toml`, the name or version is invalid, no business field remains,
/// a template fails, or a file cannot be written. Configuration errors are
/// reported as-is.
pub fn add_resource(project_root: &Path, request: &AddRequest) -> Result<AddOutcome> {
    ensure_project(project_root)?;

    let config = ScaffoldConfig::load(project_root)
        .with_context(|| format!("Failed to load {}", crate::config::CONFIG_FILE))?;

    let name = validate_resource_name(&request.name)?;
    let api_version =
        validate_api_version(request.api_version.as_deref().unwrap_or(&config.api_version))?;
    let spec = ResourceSpec::new(name, request.table.as_str(), normalize(&request.fields))?;

    let generator = ScaffoldGenerator::from_config(spec, &api_version, &config, project_root)
        .context("Failed to load templates")?;
    let artifacts = generator
        .generate()
        .context("Failed to render resource files")?;

    let paths = FileEmitter::new(project_root)
        .emit(&artifacts)
        .context("Failed to write resource files")?;

    tracing::info!(
        resource = %generator.names().resource_name,
        files = paths.len(),
        "resource scaffolded"
    );

    Ok(AddOutcome {
        names: generator.names().clone(),
        written: artifacts
            .into_iter()
            .map(|artifact| (artifact.path, artifact.description))
            .collect(),
    })
}

fn ensure_project(project_root: &Path) -> Result<(), ScaffoldError> {
    if project_root.join("Cargo.toml").is_file() {
        Ok(())
    } else {
        Err(ScaffoldError::NotAProject(project_root.to_path_buf()))
    }
}

/// The `add` command as typed on the command line
pub struct AddCommand {
    name: Option<String>,
    table: Option<String>,
    fields: Option<String>,
    path: PathBuf,
    api_version: Option<String>,
}

impl AddCommand {
    /// Create the command; missing values are prompted for on execution
    #[must_use]
    pub const fn new(
        name: Option<String>,
        table: Option<String>,
        fields: Option<String>,
        path: PathBuf,
        api_version: Option<String>,
    ) -> Self {
        Self {
            name,
            table,
            fields,
            path,
            api_version,
        }
    }

    /// Collect missing input, generate, and print the report
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails or [`add_resource`] fails.
    pub fn execute(&self) -> Result<()> {
        ensure_project(&self.path)?;

        let request = self.collect()?;

        println!(
            "\n{} {} {}",
            style("Scaffolding resource").cyan().bold(),
            style(request.name.trim()).green().bold(),
            style("...").cyan().bold()
        );

        let outcome = add_resource(&self.path, &request)?;
        print_report(&outcome);

        Ok(())
    }

    fn collect(&self) -> Result<AddRequest> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => Input::<String>::new()
                .with_prompt("Resource name")
                .interact_text()
                .context("Failed to read resource name")?,
        };
        // Fail before asking for anything else
        let name = validate_resource_name(&name)?;

        let table = match &self.table {
            Some(table) => table.clone(),
            None => Input::<String>::new()
                .with_prompt("Table name")
                .default(name.clone())
                .interact_text()
                .context("Failed to read table name")?,
        };

        let fields = match &self.fields {
            Some(fields) => fields.clone(),
            None => Input::<String>::new()
                .with_prompt("Fields (comma-separated, e.g. name,email)")
                .interact_text()
                .context("Failed to read fields")?,
        };

        Ok(AddRequest {
            name,
            table,
            fields,
            api_version: self.api_version.clone(),
        })
    }
}

fn print_report(outcome: &AddOutcome) {
    let names = &outcome.names;

    println!(
        "\n{} {} files:",
        style("Generated").green().bold(),
        outcome.written.len()
    );
    for (path, description) in &outcome.written {
        println!(
            "  {} {} ({})",
            style("✓").green(),
            style(path.display()).dim(),
            style(description).dim()
        );
    }

    println!(
        "\n{} {} is ready at {}",
        style("✨").green().bold(),
        style(&names.class_name).green().bold(),
        style(&names.route_path).yellow()
    );

    let module = &names.module_name;
    println!("\n{}", style("Next steps:").cyan().bold());
    println!(
        "  1. Register the modules: {} in src/models/mod.rs, src/schemas/mod.rs, src/services/mod.rs and src/api/{}/mod.rs",
        style(format!("pub mod {module};")).yellow(),
        names.api_version
    );
    println!(
        "  2. Mount the route: {}",
        style(format!(
            ".merge(api::{}::{module}::router())",
            names.api_version
        ))
        .yellow()
    );
    println!("  3. Build your project: {}", style("cargo build").yellow());
}
