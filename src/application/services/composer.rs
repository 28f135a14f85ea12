//! Feature composition service
//!
//! Applies a [`Feature`] to a generated project: read-modify-write of
//! `package.json`, then the feature's auxiliary files. The manifest is only
//! rewritten after every patch has applied cleanly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Feature, Language, Manifest, MANIFEST_FILE};
use crate::infrastructure::traits::FileSystem;

/// Composes optional features into a project.
pub struct ComposerService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl ComposerService {
    /// Create a new composer service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Apply one feature to the project rooted at `project_dir`.
    ///
    /// Returns the paths written, manifest first.
    #[instrument(skip(self))]
    pub fn apply(
        &self,
        project_dir: &Path,
        feature: Feature,
        language: Language,
    ) -> ApplicationResult<Vec<PathBuf>> {
        let plan = feature.plan(language, &self.settings.versions);
        let manifest_path = project_dir.join(MANIFEST_FILE);

        let mut manifest = self.load_manifest(&manifest_path)?;
        manifest.apply_all(&plan.patches)?;
        self.fs
            .write(&manifest_path, &manifest.to_pretty_string())
            .with_path_context("write manifest", &manifest_path)?;
        debug!(
            "apply: patched {} section(s) of {}",
            plan.patches.len(),
            manifest_path.display()
        );

        let mut written = vec![manifest_path];
        for file in &plan.files {
            let path = project_dir.join(&file.path);
            self.fs
                .ensure_parent(&path)
                .with_path_context("create parent directory", &path)?;
            self.fs
                .write(&path, &file.contents)
                .with_path_context("write file", &path)?;
            debug!("apply: wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Read and parse the manifest.
    pub fn load_manifest(&self, manifest_path: &Path) -> ApplicationResult<Manifest> {
        let content = self.fs.read_to_string(manifest_path).or_not_found(
            || ApplicationError::ManifestNotFound(manifest_path.to_path_buf()),
            "read manifest",
            manifest_path,
        )?;
        Manifest::parse(&content).map_err(|source| ApplicationError::InvalidManifest {
            path: manifest_path.to_path_buf(),
            source,
        })
    }
}
