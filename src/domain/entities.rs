//! Domain entities: core data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::DomainError;
use crate::domain::Feature;

/// Project name marker meaning "generate into the current directory".
pub const CURRENT_DIR_MARKER: &str = "./";

/// Language variant of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
}

impl Language {
    /// All variants, in prompt order.
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::TypeScript];

    /// Display label used in prompts and status output.
    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }

    /// Name of the template directory for this variant.
    pub fn template_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "js-template",
            Language::TypeScript => "ts-template",
        }
    }

    /// Source file extension (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            _ => Err(DomainError::UnknownLanguage(s.to_string())),
        }
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_#\-]+$").expect("static pattern"))
}

/// Validated project name.
///
/// Either a plain directory name (letters, digits, `_`, `-`, `#`) or the
/// current-directory marker `./`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Check a raw name without constructing it (used by the prompt validator).
    pub fn is_valid(input: &str) -> bool {
        input == CURRENT_DIR_MARKER || name_pattern().is_match(input)
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if Self::is_valid(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(DomainError::InvalidProjectName(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the project is generated into the working directory itself.
    pub fn is_current_dir(&self) -> bool {
        self.0 == CURRENT_DIR_MARKER
    }

    /// Resolve the project root relative to the working directory.
    pub fn resolve(&self, working_dir: &Path) -> PathBuf {
        if self.is_current_dir() {
            working_dir.to_path_buf()
        } else {
            working_dir.join(&self.0)
        }
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer record: everything the generator needs from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub name: ProjectName,
    pub language: Language,
    pub mongoose: bool,
    pub eslint: bool,
    pub prettier: bool,
}

impl Answers {
    /// Enabled features in application order.
    pub fn features(&self) -> Vec<Feature> {
        let mut features = Vec::new();
        if self.mongoose {
            features.push(Feature::Mongoose);
        }
        if self.eslint {
            features.push(Feature::Eslint);
        }
        if self.prettier {
            features.push(Feature::Prettier);
        }
        features
    }
}
