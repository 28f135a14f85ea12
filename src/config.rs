//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/create-omega/create-omega.toml`
//! 3. Environment variables: `CREATE_OMEGA_*` prefix (`__` separates nested keys)
//!
//! Templates are compiled into the binary; `templates_dir` only names an
//! on-disk replacement for them.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, FeatureVersions, Language};

/// Raw version overrides (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawVersions {
    pub mongoose: Option<String>,
    pub eslint: Option<String>,
    pub prettier: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub templates_dir: Option<PathBuf>,
    pub versions: RawVersions,
}

/// Unified configuration for create-omega.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `js-template` and `ts-template`; `None` uses the
    /// embedded templates
    pub templates_dir: Option<PathBuf>,
    /// Version ranges written for optional features
    pub versions: FeatureVersions,
}

/// Get the XDG config directory for create-omega.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "create-omega").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("create-omega.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// On-disk template directory for a language variant, if overridden.
    pub fn template_path(&self, language: Language) -> Option<PathBuf> {
        self.templates_dir
            .as_ref()
            .map(|dir| dir.join(language.template_name()))
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.templates_dir = self
            .templates_dir
            .as_ref()
            .map(|dir| PathBuf::from(expand_env_vars(dir.to_string_lossy().as_ref())));
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            templates_dir: overlay
                .templates_dir
                .clone()
                .or_else(|| self.templates_dir.clone()),
            versions: FeatureVersions {
                mongoose: overlay
                    .versions
                    .mongoose
                    .clone()
                    .unwrap_or_else(|| self.versions.mongoose.clone()),
                eslint: overlay
                    .versions
                    .eslint
                    .clone()
                    .unwrap_or_else(|| self.versions.eslint.clone()),
                prettier: overlay
                    .versions
                    .prettier
                    .clone()
                    .unwrap_or_else(|| self.versions.prettier.clone()),
            },
        }
    }

    /// Load settings with layered precedence from the XDG config location.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using an explicit global config file.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply CREATE_OMEGA_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CREATE_OMEGA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("templates_dir") {
            settings.templates_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("versions.mongoose") {
            settings.versions.mongoose = val;
        }
        if let Ok(val) = config.get_string("versions.eslint") {
            settings.versions.eslint = val;
        }
        if let Ok(val) = config.get_string("versions.prettier") {
            settings.versions.prettier = val;
        }

        Ok(settings)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
