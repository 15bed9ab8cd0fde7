//! Integration tests for resource generation
//!
//! Runs the non-interactive `add` path against temporary Cargo projects.

use anq_scaff_cli::{add_resource, AddRequest, ScaffoldError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cargo_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Cargo.toml"),
        "[package]\nname = \"shop\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    )
    .unwrap();
    dir
}

fn add(root: &Path, name: &str, table: &str, fields: &str) -> anyhow::Result<()> {
    add_resource(
        root,
        &AddRequest {
            name: name.to_string(),
            table: table.to_string(),
            fields: fields.to_string(),
            api_version: None,
        },
    )
    .map(|_| ())
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// Test the full user scenario
#[test]
fn test_user_resource() {
    let project = cargo_project();
    let root = project.path();

    add(root, "user", "users", "name, email ,phone").unwrap();

    let model = read(root, "src/models/user.rs");
    let schema = read(root, "src/schemas/user.rs");
    let service = read(root, "src/services/user.rs");
    let api = read(root, "src/api/v1/user.rs");

    assert!(model.contains(r#"#[sea_orm(table_name = "users")]"#));
    assert!(model.contains("pub phone: Option<String>,"));
    assert!(schema.contains("pub struct UserCreate {"));
    assert!(schema.contains("pub struct UserUpdate {"));
    assert!(schema.contains("pub struct UserDetail {"));
    assert!(schema.contains("pub struct UserListParams {"));
    assert!(service.contains("use crate::models::user::{"));
    assert!(service.contains("pub struct UserService;"));
    assert!(api.contains(r#"pub const ROUTE_PATH: &str = "/user/actions";"#));
    assert!(api.contains("use crate::services::user::UserService;"));
}

/// Test that system fields given by the operator are not duplicated
#[test]
fn test_system_fields_are_not_duplicated() {
    let project = cargo_project();
    let root = project.path();

    add(root, "article", "", "id,title,status,body").unwrap();

    let model = read(root, "src/models/article.rs");
    assert_eq!(model.matches("pub id: String,").count(), 1);
    assert_eq!(model.matches("pub status: i32,").count(), 1);
    assert!(model.contains(r#"#[sea_orm(table_name = "article")]"#));
    assert!(model.contains("pub title: Option<String>,"));
}

/// Test that the column width comes from project configuration
#[test]
fn test_column_width_from_config() {
    let project = cargo_project();
    let root = project.path();
    fs::write(root.join("anq-scaff.toml"), "column_width = 64\n").unwrap();

    add(root, "tag", "tags", "label").unwrap();

    assert!(read(root, "src/models/tag.rs").contains("StringLen::N(64)"));
    assert!(read(root, "src/schemas/tag.rs").contains("length(max = 64)"));
}

/// Test that template overrides replace the built-in template
#[test]
fn test_template_override() {
    let project = cargo_project();
    let root = project.path();
    fs::create_dir_all(root.join("tpl")).unwrap();
    fs::write(root.join("anq-scaff.toml"), "template_dir = \"tpl\"\n").unwrap();
    fs::write(
        root.join("tpl/api.rs.hbs"),
        "// custom route for {{class_name}} at {{route_path}}\n",
    )
    .unwrap();

    add(root, "user", "users", "name").unwrap();

    assert_eq!(
        read(root, "src/api/v1/user.rs"),
        "// custom route for User at /user/actions\n"
    );
    assert!(read(root, "src/models/user.rs").contains("pub struct Model"));
}

/// Test that a failing template leaves the project untouched
#[test]
fn test_broken_override_writes_nothing() {
    let project = cargo_project();
    let root = project.path();
    fs::create_dir_all(root.join("tpl")).unwrap();
    fs::write(root.join("anq-scaff.toml"), "template_dir = \"tpl\"\n").unwrap();
    fs::write(root.join("tpl/api.rs.hbs"), "// {{unknown_variable}}\n").unwrap();

    let err = add(root, "user", "users", "name").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScaffoldError>(),
        Some(ScaffoldError::Render { .. })
    ));
    assert!(!root.join("src").exists());
}

/// Test that re-running overwrites customised files
#[test]
fn test_rerun_overwrites() {
    let project = cargo_project();
    let root = project.path();

    add(root, "user", "users", "name").unwrap();
    fs::write(root.join("src/services/user.rs"), "// customised\n").unwrap();

    add(root, "user", "users", "name,email").unwrap();

    let service = read(root, "src/services/user.rs");
    assert!(!service.contains("// customised"));
    assert!(service.contains("data.email"));
}

/// Test that a directory without Cargo.toml is rejected
#[test]
fn test_not_a_project() {
    let dir = TempDir::new().unwrap();

    let err = add(dir.path(), "user", "users", "name").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScaffoldError>(),
        Some(ScaffoldError::NotAProject(_))
    ));
    assert!(!dir.path().join("src").exists());
}
