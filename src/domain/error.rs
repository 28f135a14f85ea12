//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rule violations in names, manifests and patches.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid project name '{0}': only letters, numbers, underscores, hyphens, hashes, or './' for the current directory")]
    InvalidProjectName(String),

    #[error("unknown language variant: {0}")]
    UnknownLanguage(String),

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("manifest has no '{section}' section")]
    MissingSection { section: String },

    #[error("manifest section '{section}' is not an object")]
    SectionNotObject { section: String },
}
