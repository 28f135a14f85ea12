//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum, ValueHint};

use crate::domain::Language;

/// Scaffold an Express project from a template, with optional Mongoose, ESLint and Prettier
#[derive(Parser, Debug)]
#[command(name = "create-omega")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run (`omega-one`)
    pub command: Option<String>,

    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory the project is created in (default: cwd)
    #[arg(short = 'C', long, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(flatten)]
    pub answers: AnswerArgs,
}

/// Answers given as flags instead of prompts.
#[derive(Args, Debug, Default, Clone)]
pub struct AnswerArgs {
    /// Project name, or `./` for the current directory (skips prompts)
    #[arg(long)]
    pub name: Option<String>,

    /// Language variant
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Include Mongoose
    #[arg(long)]
    pub mongoose: bool,

    /// Include ESLint
    #[arg(long)]
    pub eslint: bool,

    /// Include Prettier
    #[arg(long)]
    pub prettier: bool,

    /// Never prompt; take all answers from flags
    #[arg(long)]
    pub no_interactive: bool,
}

impl AnswerArgs {
    /// Flags replace the prompt sequence entirely.
    pub fn skip_prompts(&self) -> bool {
        self.no_interactive || self.name.is_some()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    #[value(alias = "js")]
    Javascript,
    #[value(alias = "ts")]
    Typescript,
}

impl From<VariantArg> for Language {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Javascript => Language::JavaScript,
            VariantArg::Typescript => Language::TypeScript,
        }
    }
}
