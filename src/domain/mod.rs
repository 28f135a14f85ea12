//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod feature;
pub mod manifest;
pub mod template;

pub use entities::*;
pub use error::DomainError;
pub use feature::{AuxFile, Feature, FeaturePlan, FeatureVersions};
pub use manifest::{Manifest, MergePatch, MANIFEST_FILE};
pub use template::{tree_from_files, TemplateEntry};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Returns the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
