//! Error conversion helpers for filesystem operations
//!
//! Every I/O failure surfaced by the services carries the action and the path.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.create_dir(&dest)
    ///     .with_path_context("create directory", &dest)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Like [`with_path_context`](Self::with_path_context), but a `NotFound`
    /// error becomes the given application error instead.
    fn or_not_found(
        self,
        not_found: impl FnOnce() -> ApplicationError,
        action: &str,
        path: &Path,
    ) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn or_not_found(
        self,
        not_found: impl FnOnce() -> ApplicationError,
        action: &str,
        path: &Path,
    ) -> ApplicationResult<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e).with_path_context(action, path),
        }
    }
}
