//! Optional feature bundles
//!
//! Each feature is a list of manifest merge patches plus the auxiliary files it
//! writes into the project. Nothing here touches the filesystem.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{Language, MergePatch};

/// Optional feature that can be composed into a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// MongoDB driver plus a connection module
    Mongoose,
    /// Linter with config embedded in the manifest and a standalone rc file
    Eslint,
    /// Formatter with a `format` script and an rc file
    Prettier,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Mongoose => "Mongoose",
            Feature::Eslint => "ESLint",
            Feature::Prettier => "Prettier",
        }
    }

    /// Build the patches and files for this feature.
    pub fn plan(&self, language: Language, versions: &FeatureVersions) -> FeaturePlan {
        match self {
            Feature::Mongoose => FeaturePlan {
                patches: vec![MergePatch::new(&["dependencies"])
                    .entry("mongoose", versions.mongoose.as_str())],
                files: vec![AuxFile {
                    path: PathBuf::from("config")
                        .join("db")
                        .join(format!("dbConfig.{}", language.extension())),
                    contents: db_config_source(language).to_string(),
                }],
            },
            Feature::Eslint => FeaturePlan {
                patches: vec![
                    MergePatch::new(&["devDependencies"])
                        .entry("eslint", versions.eslint.as_str()),
                    MergePatch::new(&[]).entry("eslintConfig", eslint_rules()),
                ],
                files: vec![AuxFile {
                    path: PathBuf::from(ESLINT_RC),
                    contents: render_eslint_rc(&eslint_rules()),
                }],
            },
            Feature::Prettier => FeaturePlan {
                patches: vec![
                    MergePatch::new(&["scripts"]).entry("format", FORMAT_SCRIPT),
                    MergePatch::new(&["devDependencies"])
                        .entry("prettier", versions.prettier.as_str()),
                ],
                files: vec![AuxFile {
                    path: PathBuf::from(PRETTIER_RC),
                    contents: render_json(&prettier_rules()),
                }],
            },
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Version ranges written into the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeatureVersions {
    pub mongoose: String,
    pub eslint: String,
    pub prettier: String,
}

impl Default for FeatureVersions {
    fn default() -> Self {
        Self {
            mongoose: "^5.12.3".into(),
            eslint: "^7.23.0".into(),
            prettier: "^2.2.1".into(),
        }
    }
}

/// Everything a feature changes in a project.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePlan {
    pub patches: Vec<MergePatch>,
    pub files: Vec<AuxFile>,
}

/// File written verbatim, path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxFile {
    pub path: PathBuf,
    pub contents: String,
}

pub const ESLINT_RC: &str = ".eslintrc.js";
pub const ESLINT_RC_PREFIX: &str = "export default ";
pub const PRETTIER_RC: &str = ".prettierrc";
pub const FORMAT_SCRIPT: &str = "prettier --write .";

/// Rule set shared by the manifest's `eslintConfig` block and `.eslintrc.js`.
pub fn eslint_rules() -> Value {
    json!({
        "extends": ["eslint:recommended", "plugin:prettier/recommended"],
        "env": {
            "es2021": true,
            "node": true
        },
        "parserOptions": {
            "ecmaVersion": 12,
            "sourceType": "module"
        },
        "rules": {
            "prettier/prettier": "error"
        }
    })
}

fn prettier_rules() -> Value {
    json!({
        "singleQuote": true,
        "trailingComma": "all",
        "tabWidth": 4
    })
}

fn render_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn render_eslint_rc(rules: &Value) -> String {
    format!("{}{};\n", ESLINT_RC_PREFIX, render_json(rules))
}

fn db_config_source(language: Language) -> &'static str {
    match language {
        Language::JavaScript => DB_CONFIG_JS,
        Language::TypeScript => DB_CONFIG_TS,
    }
}

const DB_CONFIG_JS: &str = r#"import mongoose from 'mongoose';

const connectDB = async (MONGO_URI) => {
    try {
        await mongoose.connect(MONGO_URI, {
            useNewUrlParser: true,
            useUnifiedTopology: true,
        });
        console.log('MongoDB Connected...');
    } catch (err) {
        console.error(err.message);
        process.exit(1);
    }
};

export default connectDB;
"#;

const DB_CONFIG_TS: &str = r#"import mongoose from 'mongoose';

const connectDB = async (MONGO_URI: string): Promise<void> => {
    try {
        await mongoose.connect(MONGO_URI, {
            useNewUrlParser: true,
            useUnifiedTopology: true,
        });
        console.log('MongoDB Connected...');
    } catch (err) {
        if (err instanceof Error) {
            console.error(err.message);
        } else {
            console.error('An unknown error occurred');
        }
        process.exit(1);
    }
};

export default connectDB;
"#;
