//! Templates embedded into the binary
//!
//! `templates/` is compiled in with `rust-embed`, so a copied or installed
//! binary generates projects without its source tree. An on-disk
//! `templates_dir` in the settings takes precedence.

use std::io;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{tree_from_files, Language, TemplateEntry};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateAssets;

/// Load the embedded template tree for a language variant.
pub fn embedded_template(language: Language) -> ApplicationResult<Vec<TemplateEntry>> {
    let prefix = format!("{}/", language.template_name());

    let mut files = Vec::new();
    for path in TemplateAssets::iter().filter(|p| p.starts_with(&prefix)) {
        let Some(file) = TemplateAssets::get(&path) else {
            continue;
        };
        let contents = String::from_utf8(file.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            .with_path_context("read embedded template file", Path::new(&*path))?;
        files.push((path[prefix.len()..].to_string(), contents));
    }

    if files.is_empty() {
        return Err(ApplicationError::TemplateNotFound(PathBuf::from(
            language.template_name(),
        )));
    }
    debug!("embedded_template: {} files for {}", files.len(), language);
    Ok(tree_from_files(files))
}
