//! `package.json` manifest and the generic merge patch applied to it
//!
//! Key order is preserved (serde_json `preserve_order`), so re-serializing an
//! untouched manifest only normalizes whitespace.

use serde_json::{Map, Value};

use crate::domain::DomainError;

/// File name of the manifest inside a generated project.
pub const MANIFEST_FILE: &str = "package.json";

/// Parsed manifest document. The root is always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| DomainError::InvalidManifest {
                message: e.to_string(),
            })?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(DomainError::InvalidManifest {
                message: "root is not an object".to_string(),
            }),
        }
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> String {
        // A Map of Values always serializes
        let mut out = serde_json::to_string_pretty(&self.root).unwrap_or_default();
        out.push('\n');
        out
    }

    /// Look up a value by key path.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.root.get(*first)?, |value, key| value.get(*key))
    }

    /// Apply a merge patch.
    pub fn apply(&mut self, patch: &MergePatch) -> Result<(), DomainError> {
        let target = self.section_mut(&patch.section)?;
        for (key, value) in &patch.entries {
            target.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Apply patches in order, all or nothing.
    pub fn apply_all(&mut self, patches: &[MergePatch]) -> Result<(), DomainError> {
        let mut staged = self.clone();
        for patch in patches {
            staged.apply(patch)?;
        }
        *self = staged;
        Ok(())
    }

    fn section_mut(&mut self, section: &[String]) -> Result<&mut Map<String, Value>, DomainError> {
        let mut current = &mut self.root;
        for (depth, key) in section.iter().enumerate() {
            let label = section[..=depth].join(".");
            current = match current.get_mut(key) {
                Some(Value::Object(map)) => map,
                Some(_) => return Err(DomainError::SectionNotObject { section: label }),
                None => return Err(DomainError::MissingSection { section: label }),
            };
        }
        Ok(current)
    }
}

/// Merge a set of key/value pairs into the object at `section`.
///
/// An empty section path targets the manifest root. Same-named keys are
/// overwritten; every other key is left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct MergePatch {
    pub section: Vec<String>,
    pub entries: Map<String, Value>,
}

impl MergePatch {
    pub fn new(section: &[&str]) -> Self {
        Self {
            section: section.iter().map(|s| s.to_string()).collect(),
            entries: Map::new(),
        }
    }

    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn section_label(&self) -> String {
        self.section.join(".")
    }
}
