//! Field list normalisation
//!
//! The operator types fields as one comma-separated line. That line is the
//! single source of truth for every artifact, so it is normalised exactly once.

use super::error::{Result, ScaffoldError};
use anq_scaff::model::is_system_field;

/// Split a comma-separated field list
///
/// Pieces are trimmed and empty ones dropped. Order and duplicates are kept;
/// names are not checked for being valid identifiers.
///
/// ```
/// use anq_scaff_cli::scaffold::fields::normalize;
///
/// assert_eq!(normalize(" name, ,email,"), vec!["name", "email"]);
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Everything needed to render one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Resource name as validated by the front-end
    pub resource_name: String,
    /// Backing table
    pub table_name: String,
    /// Business fields in input order, system fields excluded
    pub fields: Vec<String>,
}

impl ResourceSpec {
    /// Build a spec from already-normalised fields
    ///
    /// System field names are dropped with a warning, and an empty table
    /// name falls back to the resource name.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::NoFields`] if no business field remains.
    pub fn new(
        resource_name: impl Into<String>,
        table_name: impl Into<String>,
        fields: Vec<String>,
    ) -> Result<Self> {
        let resource_name = resource_name.into();
        let table_name = table_name.into();
        let table_name = if table_name.trim().is_empty() {
            resource_name.clone()
        } else {
            table_name.trim().to_string()
        };

        let fields: Vec<String> = fields
            .into_iter()
            .filter(|field| {
                let system = is_system_field(field);
                if system {
                    tracing::warn!(field = %field, "dropping system field, it is generated automatically");
                }
                !system
            })
            .collect();

        if fields.is_empty() {
            return Err(ScaffoldError::NoFields);
        }

        Ok(Self {
            resource_name,
            table_name,
            fields,
        })
    }
}
