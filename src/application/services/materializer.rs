//! Template materialization service
//!
//! Reads a template directory into [`TemplateEntry`] values and writes them
//! under a destination directory. Directories are created with `create_dir`,
//! so an existing directory of the same name aborts the copy; entries written
//! before the failure are left in place.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::TemplateEntry;
use crate::infrastructure::traits::FileSystem;

/// Copies template trees into new projects.
pub struct MaterializerService {
    fs: Arc<dyn FileSystem>,
}

impl MaterializerService {
    /// Create a new materializer service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Reproduce `source` under `dest`. Returns the number of files written.
    ///
    /// `dest` itself must already exist.
    #[instrument(skip(self))]
    pub fn materialize(&self, source: &Path, dest: &Path) -> ApplicationResult<usize> {
        let entries = self.read(source)?;
        self.write(dest, &entries)?;
        let files = entries.iter().map(TemplateEntry::file_count).sum();
        debug!("materialize: wrote {} files", files);
        Ok(files)
    }

    /// Read the direct and nested children of a template directory.
    ///
    /// Entries are sorted by name. Anything that is neither a regular file nor
    /// a directory is skipped.
    pub fn read(&self, dir: &Path) -> ApplicationResult<Vec<TemplateEntry>> {
        if !self.fs.is_dir(dir) {
            return Err(ApplicationError::TemplateNotFound(dir.to_path_buf()));
        }

        let mut paths = self
            .fs
            .read_dir(dir)
            .with_path_context("list template directory", dir)?;
        paths.sort();

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "file name is not valid UTF-8",
                    ))
                    .with_path_context("read template entry", &path)
                }
            };

            if self.fs.is_file(&path) {
                let contents = self
                    .fs
                    .read_to_string(&path)
                    .with_path_context("read template file", &path)?;
                entries.push(TemplateEntry::File { name, contents });
            } else if self.fs.is_dir(&path) {
                let children = self.read(&path)?;
                entries.push(TemplateEntry::Directory { name, children });
            } else {
                debug!("read: skipping {}", path.display());
            }
        }
        Ok(entries)
    }

    /// Write entries under `dest`, applying the ignore-file rename.
    pub fn write(&self, dest: &Path, entries: &[TemplateEntry]) -> ApplicationResult<()> {
        for entry in entries {
            let target = dest.join(entry.output_name());
            debug!("write: {} -> {}", entry.name(), target.display());
            match entry {
                TemplateEntry::File { contents, .. } => {
                    self.fs
                        .write(&target, contents)
                        .with_path_context("write file", &target)?;
                }
                TemplateEntry::Directory { children, .. } => {
                    self.fs
                        .create_dir(&target)
                        .with_path_context("create directory", &target)?;
                    self.write(&target, children)?;
                }
            }
        }
        Ok(())
    }
}
