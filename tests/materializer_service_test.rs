//! Tests for MaterializerService against the real filesystem

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use create_omega::application::services::MaterializerService;
use create_omega::application::ApplicationError;
use create_omega::infrastructure::traits::RealFileSystem;

/// Collect every file under `root` as relative path -> contents, plus directories.
fn tree(root: &Path) -> BTreeMap<PathBuf, Option<String>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Option<String>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            if path.is_dir() {
                out.insert(rel, None);
                walk(root, &path, out);
            } else {
                out.insert(rel, Some(fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn create_template(dir: &TempDir) -> PathBuf {
    let src = dir.path().join("template");
    fs::create_dir_all(src.join("router")).unwrap();
    fs::create_dir_all(src.join("views/partials")).unwrap();
    fs::create_dir_all(src.join("empty")).unwrap();
    fs::write(src.join("app.js"), "import express from 'express';\n").unwrap();
    fs::write(src.join(".npmignore"), "node_modules/\n").unwrap();
    fs::write(src.join("router/routes.js"), "export default router;").unwrap();
    fs::write(src.join("views/partials/.npmignore"), "nested\n").unwrap();
    fs::write(src.join("views/index.html"), "<h1>héllo</h1>\n").unwrap();
    src
}

#[test]
fn given_template_when_materializing_then_tree_is_copied_with_ignore_rename() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let src = create_template(&temp);
    let dest = temp.path().join("project");
    fs::create_dir(&dest).unwrap();
    let service = MaterializerService::new(Arc::new(RealFileSystem));

    // Act
    let copied = service.materialize(&src, &dest).unwrap();

    // Assert
    let mut expected = tree(&src);
    for key in expected.keys().cloned().collect::<Vec<_>>() {
        if key.file_name().and_then(|n| n.to_str()) == Some(".npmignore") {
            let value = expected.remove(&key).unwrap();
            expected.insert(key.with_file_name(".gitignore"), value);
        }
    }
    assert_eq!(tree(&dest), expected);
    assert_eq!(copied, 5);
    assert!(!dest.join(".npmignore").exists());
    assert!(!dest.join("views/partials/.npmignore").exists());
}

#[test]
fn given_existing_subdirectory_when_materializing_then_fails_and_keeps_earlier_entries() {
    // Arrange: "router" exists already; "app.js" and ".npmignore" sort before it
    let temp = TempDir::new().unwrap();
    let src = create_template(&temp);
    let dest = temp.path().join("project");
    fs::create_dir_all(dest.join("router")).unwrap();
    fs::write(dest.join("router/keep.txt"), "mine").unwrap();
    let service = MaterializerService::new(Arc::new(RealFileSystem));

    // Act
    let result = service.materialize(&src, &dest);

    // Assert
    assert!(matches!(result, Err(ApplicationError::OperationFailed { .. })));
    assert!(dest.join("app.js").exists());
    assert!(dest.join(".gitignore").exists());
    assert_eq!(fs::read_to_string(dest.join("router/keep.txt")).unwrap(), "mine");
    assert!(!dest.join("router/routes.js").exists());
    assert!(!dest.join("views").exists());
}

#[test]
fn given_missing_template_when_materializing_then_template_not_found() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let service = MaterializerService::new(Arc::new(RealFileSystem));

    // Act
    let result = service.materialize(&temp.path().join("nope"), temp.path());

    // Assert
    assert!(matches!(result, Err(ApplicationError::TemplateNotFound(_))));
}

#[test]
fn given_binary_template_file_when_materializing_then_fails() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("template");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("logo.png"), [0x89, 0x50, 0xff, 0xfe]).unwrap();
    let dest = temp.path().join("project");
    fs::create_dir(&dest).unwrap();
    let service = MaterializerService::new(Arc::new(RealFileSystem));

    // Act
    let result = service.materialize(&src, &dest);

    // Assert
    assert!(result.is_err());
    assert!(!dest.join("logo.png").exists());
}

#[test]
fn given_shipped_templates_when_materializing_then_package_json_and_gitignore_exist() {
    let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    for name in ["js-template", "ts-template"] {
        // Arrange
        let temp = TempDir::new().unwrap();
        let service = MaterializerService::new(Arc::new(RealFileSystem));

        // Act
        service
            .materialize(&templates.join(name), temp.path())
            .unwrap();

        // Assert
        assert!(temp.path().join("package.json").is_file(), "{name}");
        assert!(temp.path().join(".gitignore").is_file(), "{name}");
        assert!(temp.path().join("router").is_dir(), "{name}");
    }
}
