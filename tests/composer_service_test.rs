//! Tests for ComposerService
//!
//! Each feature is a read-modify-write of package.json plus auxiliary files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use create_omega::application::services::ComposerService;
use create_omega::application::ApplicationError;
use create_omega::config::Settings;
use create_omega::domain::feature::ESLINT_RC_PREFIX;
use create_omega::domain::{DomainError, Feature, Language};
use create_omega::infrastructure::traits::RealFileSystem;

const MANIFEST: &str = r#"{
  "name": "demo",
  "version": "1.0.0",
  "scripts": {
    "start": "node server.js"
  },
  "dependencies": {
    "express": "^4.18.2"
  },
  "devDependencies": {
    "nodemon": "^2.0.22"
  }
}"#;

fn project_with_manifest(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), manifest).unwrap();
    temp
}

fn service() -> ComposerService {
    ComposerService::new(Arc::new(RealFileSystem), Arc::new(Settings::default()))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================
// Mongoose
// ============================================================

#[test]
fn given_manifest_when_adding_mongoose_then_dependency_added_and_others_kept() {
    // Arrange
    let project = project_with_manifest(MANIFEST);

    // Act
    service()
        .apply(project.path(), Feature::Mongoose, Language::JavaScript)
        .unwrap();

    // Assert
    let manifest = read_json(&project.path().join("package.json"));
    assert_eq!(manifest["dependencies"]["mongoose"], json!("^5.12.3"));
    assert_eq!(manifest["dependencies"]["express"], json!("^4.18.2"));
    assert_eq!(manifest["scripts"]["start"], json!("node server.js"));
    let db = fs::read_to_string(project.path().join("config/db/dbConfig.js")).unwrap();
    assert!(db.contains("MongoDB Connected..."));
}

#[test]
fn given_mongoose_applied_twice_when_reading_then_manifest_stable_and_file_rewritten() {
    // Arrange
    let project = project_with_manifest(MANIFEST);
    let service = service();
    service
        .apply(project.path(), Feature::Mongoose, Language::TypeScript)
        .unwrap();
    let first = fs::read_to_string(project.path().join("package.json")).unwrap();
    let db_path = project.path().join("config/db/dbConfig.ts");
    fs::write(&db_path, "edited by hand").unwrap();

    // Act
    service
        .apply(project.path(), Feature::Mongoose, Language::TypeScript)
        .unwrap();

    // Assert
    let second = fs::read_to_string(project.path().join("package.json")).unwrap();
    assert_eq!(first, second);
    let db = fs::read_to_string(&db_path).unwrap();
    assert!(db.contains("Promise<void>"));
}

#[test]
fn given_manifest_without_dependencies_when_adding_mongoose_then_missing_section() {
    // Arrange
    let project = project_with_manifest(r#"{"name": "demo"}"#);

    // Act
    let err = service()
        .apply(project.path(), Feature::Mongoose, Language::JavaScript)
        .unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::MissingSection { ref section }) if section == "dependencies"
    ));
    assert!(!project.path().join("config").exists());
}

// ============================================================
// ESLint
// ============================================================

#[test]
fn given_eslint_when_applied_then_embedded_block_matches_standalone_file() {
    // Arrange
    let project = project_with_manifest(MANIFEST);

    // Act
    service()
        .apply(project.path(), Feature::Eslint, Language::JavaScript)
        .unwrap();

    // Assert
    let manifest = read_json(&project.path().join("package.json"));
    assert_eq!(manifest["devDependencies"]["eslint"], json!("^7.23.0"));
    assert_eq!(manifest["devDependencies"]["nodemon"], json!("^2.0.22"));

    let rc = fs::read_to_string(project.path().join(".eslintrc.js")).unwrap();
    let body = rc
        .trim_end()
        .strip_prefix(ESLINT_RC_PREFIX)
        .and_then(|s| s.strip_suffix(';'))
        .expect("rc file wraps an object literal");
    let standalone: Value = serde_json::from_str(body).unwrap();
    assert_eq!(manifest["eslintConfig"], standalone);
    assert_eq!(standalone["env"]["node"], json!(true));
}

#[test]
fn given_manifest_without_dev_dependencies_when_adding_eslint_then_fails_before_writing() {
    // Arrange
    let original = r#"{"name": "demo", "dependencies": {}}"#;
    let project = project_with_manifest(original);

    // Act
    let result = service().apply(project.path(), Feature::Eslint, Language::JavaScript);

    // Assert
    assert!(result.is_err());
    assert_eq!(
        fs::read_to_string(project.path().join("package.json")).unwrap(),
        original
    );
    assert!(!project.path().join(".eslintrc.js").exists());
}

// ============================================================
// Prettier
// ============================================================

#[test]
fn given_prettier_when_applied_then_format_script_and_rc_written() {
    // Arrange
    let project = project_with_manifest(MANIFEST);

    // Act
    service()
        .apply(project.path(), Feature::Prettier, Language::TypeScript)
        .unwrap();

    // Assert
    let manifest = read_json(&project.path().join("package.json"));
    assert_eq!(manifest["scripts"]["format"], json!("prettier --write ."));
    assert_eq!(manifest["scripts"]["start"], json!("node server.js"));
    assert_eq!(manifest["devDependencies"]["prettier"], json!("^2.2.1"));
    let rc = read_json(&project.path().join(".prettierrc"));
    assert_eq!(
        rc,
        json!({"singleQuote": true, "trailingComma": "all", "tabWidth": 4})
    );
}

#[test]
fn given_existing_format_script_when_adding_prettier_then_overwritten() {
    // Arrange
    let project = project_with_manifest(
        r#"{"scripts": {"format": "old"}, "devDependencies": {}}"#,
    );

    // Act
    service()
        .apply(project.path(), Feature::Prettier, Language::JavaScript)
        .unwrap();

    // Assert
    let manifest = read_json(&project.path().join("package.json"));
    assert_eq!(manifest["scripts"]["format"], json!("prettier --write ."));
}

// ============================================================
// Manifest handling
// ============================================================

#[test]
fn given_no_manifest_when_applying_then_manifest_not_found() {
    // Arrange
    let project = TempDir::new().unwrap();

    // Act
    let err = service()
        .apply(project.path(), Feature::Prettier, Language::JavaScript)
        .unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::ManifestNotFound(_)));
}

#[test]
fn given_invalid_json_when_applying_then_invalid_manifest() {
    // Arrange
    let project = project_with_manifest("{ \"name\": ");

    // Act
    let err = service()
        .apply(project.path(), Feature::Mongoose, Language::JavaScript)
        .unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::InvalidManifest { .. }));
}

#[test]
fn given_manifest_when_rewritten_then_two_space_indent_and_key_order_kept() {
    // Arrange
    let project = project_with_manifest(MANIFEST);

    // Act
    service()
        .apply(project.path(), Feature::Mongoose, Language::JavaScript)
        .unwrap();

    // Assert
    let text = fs::read_to_string(project.path().join("package.json")).unwrap();
    let keys: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("  \"") && !l.starts_with("    "))
        .map(|l| l.trim().split('"').nth(1).unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["name", "version", "scripts", "dependencies", "devDependencies"]
    );
    assert!(text.contains("\n    \"express\": \"^4.18.2\",\n    \"mongoose\": \"^5.12.3\"\n"));
}
