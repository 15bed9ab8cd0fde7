//! Artifact templates
//!
//! Four Handlebars templates, one per generated file. They are rendered in
//! strict mode with escaping disabled, so a typo in a variable name fails the
//! render instead of emitting broken code.
//!
//! Every template sees the same context (see
//! [`ScaffoldGenerator`](super::ScaffoldGenerator)); `fields` is a list of
//! plain strings, and the `pascal_case` helper turns a field into its SeaORM
//! column variant.

use super::error::{Result, ScaffoldError};
use handlebars::{handlebars_helper, Handlebars};
use inflector::Inflector;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// SeaORM entity
pub const MODEL_TEMPLATE: &str = r#"//! {{class_name}} entity, table `{{table_name}}`

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// `status` value of an enabled record
pub const STATUS_ENABLED: i32 = {{status_enabled}};

/// `status` value of a disabled record
pub const STATUS_DISABLED: i32 = 0;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "{{table_name}}")]
pub struct Model {
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N({{id_width}}))",
        comment = "primary key (snowflake id)"
    )]
    pub id: String,
{{#each fields}}
    #[sea_orm(column_type = "String(StringLen::N({{../column_width}}))", nullable, comment = "{{this}}")]
    pub {{this}}: Option<String>,
{{/each}}
    #[sea_orm(default_value = {{status_enabled}}, comment = "status: 1 enabled, 0 disabled")]
    pub status: i32,
    #[sea_orm(default_expr = "Expr::current_timestamp()", comment = "created at")]
    pub created_at: Option<DateTime>,
    #[sea_orm(default_expr = "Expr::current_timestamp()", comment = "updated at")]
    pub updated_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().naive_utc();
        if insert {
            self.created_at = Set(Some(now));
        }
        self.updated_at = Set(Some(now));
        Ok(self)
    }
}

impl Model {
    /// JSON projection returned by `list` and `get`
    #[must_use]
    pub fn to_dict(&self) -> Value {
        json!({
            "id": self.id,
{{#each fields}}
            "{{this}}": self.{{this}},
{{/each}}
            "status": self.status,
            "created_at": self.created_at.map(|at| at.format("%Y-%m-%dT%H:%M:%S").to_string()),
            "updated_at": self.updated_at.map(|at| at.format("%Y-%m-%dT%H:%M:%S").to_string()),
        })
    }
}
"#;

/// Request and response shapes
pub const SCHEMA_TEMPLATE: &str = r#"//! Request and response shapes for {{class_name}}

use anq_scaff::action::{Filters, Pagination};
use serde::{Deserialize, Serialize};
use validator::Validate;

const fn default_page() -> u64 { {{default_page}} }

const fn default_page_size() -> u64 { {{default_page_size}} }

/// Payload of the `create` action
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct {{class_name}}Create {
{{#each fields}}
    #[validate(length(max = {{../column_width}}))]
    pub {{this}}: Option<String>,
{{/each}}
}

/// Payload of the `update` action; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct {{class_name}}Update {
{{#each fields}}
    #[validate(length(max = {{../column_width}}))]
    pub {{this}}: Option<String>,
{{/each}}
    #[validate(range(min = 0, max = 1))]
    pub status: Option<i32>,
}

/// Item projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct {{class_name}}Detail {
    pub id: Option<String>,
{{#each fields}}
    pub {{this}}: Option<String>,
{{/each}}
    pub status: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Parameters of the `list` action
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct {{class_name}}ListParams {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = {{max_page_size}}))]
    pub size: u64,
    #[serde(default)]
    pub filters: Filters,
}

impl Pagination for {{class_name}}ListParams {
    fn page(&self) -> u64 {
        self.page
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn filters(&self) -> &Filters {
        &self.filters
    }
}
"#;

/// Service layer
pub const SERVICE_TEMPLATE: &str = r#"//! Persistence operations for {{class_name}}

use anq_scaff::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde_json::Value;

use crate::db;
use crate::models::{{module_name}}::{ActiveModel, Column, Entity, Model, STATUS_ENABLED};
use crate::schemas::{{module_name}}::{ {{class_name}}Create, {{class_name}}ListParams, {{class_name}}Update };

/// CRUD service for the `{{table_name}}` table
#[derive(Debug, Clone, Copy, Default)]
pub struct {{class_name}}Service;

impl {{class_name}}Service {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn filter_column(name: &str) -> Option<Column> {
    match name {
{{#each fields}}
        "{{this}}" => Some(Column::{{pascal_case this}}),
{{/each}}
        "status" => Some(Column::Status),
        _ => None,
    }
}

fn filter_value(value: &Value) -> Option<sea_orm::Value> {
    match value {
        Value::String(text) => Some(text.clone().into()),
        Value::Number(number) => number.as_i64().map(Into::into),
        Value::Bool(flag) => Some((*flag).into()),
        _ => None,
    }
}

#[async_trait]
impl ResourceService for {{class_name}}Service {
    type Item = Value;
    type Create = {{class_name}}Create;
    type Update = {{class_name}}Update;
    type ListParams = {{class_name}}ListParams;

    async fn list(&self, page: u64, size: u64, filters: Filters) -> anyhow::Result<(Vec<Value>, u64)> {
        let txn = db::connection().begin().await?;

        let mut query = Entity::find();
        for (name, value) in &filters {
            match (filter_column(name), filter_value(value)) {
                (Some(column), Some(value)) => query = query.filter(column.eq(value)),
                _ => tracing::debug!(filter = %name, "ignoring unknown filter"),
            }
        }

        let paginator = query.order_by_desc(Column::CreatedAt).paginate(&txn, size);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        txn.commit().await?;

        Ok((rows.iter().map(Model::to_dict).collect(), total))
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<Value>> {
        let txn = db::connection().begin().await?;
        let found = Entity::find_by_id(id.to_string()).one(&txn).await?;
        txn.commit().await?;

        Ok(found.as_ref().map(Model::to_dict))
    }

    async fn create(&self, data: {{class_name}}Create) -> anyhow::Result<String> {
        let id = anq_scaff::id::next_id()?;
        let txn = db::connection().begin().await?;

        ActiveModel {
            id: Set(id.clone()),
{{#each fields}}
            {{this}}: Set(data.{{this}}),
{{/each}}
            status: Set(STATUS_ENABLED),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!(id = %id, "created {{resource_name}}");
        Ok(id)
    }

    async fn update(&self, id: &str, data: {{class_name}}Update) -> anyhow::Result<bool> {
        let txn = db::connection().begin().await?;
        let Some(existing) = Entity::find_by_id(id.to_string()).one(&txn).await? else {
            return Ok(false);
        };

        let patch = SparsePatch::from_serializable(&data)?;
        if patch.is_empty() {
            return Ok(true);
        }

        let mut active: ActiveModel = existing.into();
{{#each fields}}
        if let Some(value) = data.{{this}} {
            active.{{this}} = Set(Some(value));
        }
{{/each}}
        if let Some(status) = data.status {
            active.status = Set(status);
        }
        active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(id = %id, fields = patch.len(), "updated {{resource_name}}");
        Ok(true)
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let txn = db::connection().begin().await?;
        let Some(existing) = Entity::find_by_id(id.to_string()).one(&txn).await? else {
            return Ok(false);
        };

        existing.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(id = %id, "deleted {{resource_name}}");
        Ok(true)
    }
}
"#;

/// HTTP route module
pub const API_TEMPLATE: &str = r#"//! Unified action endpoint for {{class_name}}
//!
//! `POST {{route_path}}` with a body of the form
//! `{ "action": "list" | "get" | "create" | "update" | "delete", "params": { ... } }`.

use anq_scaff::prelude::*;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};

use crate::services::{{module_name}}::{{class_name}}Service;

/// Mount point of the endpoint
pub const ROUTE_PATH: &str = "{{route_path}}";

/// Grouping tag for API docs
pub const TAG: &str = "{{module_name}}";

/// Router serving the unified action endpoint
pub fn router() -> Router {
    Router::new().route(ROUTE_PATH, post(unified_action))
}

/// Dispatch one action; always answers with an envelope
pub async fn unified_action(payload: Result<Json<ActionRequest>, JsonRejection>) -> Json<Envelope> {
    handle(&{{class_name}}Service::new(), payload).await
}
"#;

handlebars_helper!(pascal_case: |value: str| value.to_pascal_case());

/// Named templates with optional on-disk overrides
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Names of the built-in templates
    pub const NAMES: [&'static str; 4] = ["model", "schema", "service", "api"];

    /// Registry with only the built-in templates
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Template`] if a built-in template fails to
    /// parse.
    pub fn new() -> Result<Self> {
        Self::with_overrides(None)
    }

    /// Registry where `<dir>/<name>.rs.hbs` replaces a built-in template
    ///
    /// Missing override files fall back to the built-in template.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if an override exists but cannot be read,
    /// or [`ScaffoldError::Template`] if any template fails to parse.
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generating code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        handlebars.register_helper("pascal_case", Box::new(pascal_case));

        for name in Self::NAMES {
            let source = match dir.map(|dir| dir.join(format!("{name}.rs.hbs"))) {
                Some(path) if path.is_file() => {
                    tracing::debug!(template = name, path = %path.display(), "using template override");
                    fs::read_to_string(&path).map_err(|source| ScaffoldError::Io { path, source })?
                }
                _ => Self::builtin(name).to_string(),
            };

            handlebars
                .register_template_string(name, source)
                .map_err(|source| ScaffoldError::Template {
                    name: name.to_string(),
                    source: Box::new(source),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Render a registered template
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Render`] if the template references a
    /// variable missing from `context` or a helper fails.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(name, context)
            .map_err(|source| ScaffoldError::Render {
                name: name.to_string(),
                source: Box::new(source),
            })
    }

    fn builtin(name: &str) -> &'static str {
        match name {
            "model" => MODEL_TEMPLATE,
            "schema" => SCHEMA_TEMPLATE,
            "service" => SERVICE_TEMPLATE,
            _ => API_TEMPLATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_templates_avoid_triple_braces() {
        for template in [MODEL_TEMPLATE, SCHEMA_TEMPLATE, SERVICE_TEMPLATE, API_TEMPLATE] {
            assert!(!template.contains("{{{"));
            assert!(!template.contains("}}}"));
        }
    }

    #[test]
    fn test_builtin_templates_parse() {
        assert!(TemplateRegistry::new().is_ok());
    }

    #[test]
    fn test_pascal_case_helper() {
        let registry = TemplateRegistry::new().unwrap();
        let mut handlebars = registry.handlebars;
        handlebars
            .register_template_string("probe", "{{pascal_case name}}")
            .unwrap();

        let rendered = handlebars
            .render("probe", &json!({"name": "created_at"}))
            .unwrap();
        assert_eq!(rendered, "CreatedAt");
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("api.rs.hbs"), "// {{no_such_key}}\n").unwrap();

        let registry = TemplateRegistry::with_overrides(Some(dir.path())).unwrap();
        let result = registry.render("api", &json!({"class_name": "User"}));

        assert!(matches!(result, Err(ScaffoldError::Render { name, .. }) if name == "api"));
    }

    #[test]
    fn test_override_replaces_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("model.rs.hbs"), "// custom {{class_name}}\n").unwrap();

        let registry = TemplateRegistry::with_overrides(Some(dir.path())).unwrap();
        let rendered = registry.render("model", &json!({"class_name": "User"})).unwrap();

        assert_eq!(rendered, "// custom User\n");
    }

    #[test]
    fn test_broken_override_fails_to_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("schema.rs.hbs"), "{{#each fields}}unclosed").unwrap();

        assert!(matches!(
            TemplateRegistry::with_overrides(Some(dir.path())),
            Err(ScaffoldError::Template { name, .. }) if name == "schema"
        ));
    }

    #[test]
    fn test_no_escaping() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("api.rs.hbs"), "{{route_path}}").unwrap();

        let registry = TemplateRegistry::with_overrides(Some(dir.path())).unwrap();
        let rendered = registry
            .render("api", &json!({"route_path": "/a&b<c>/actions"}))
            .unwrap();

        assert_eq!(rendered, "/a&b<c>/actions");
    }
}
