//! CLI layer: argument parsing, answer collection and command dispatch

pub mod answers;
pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{AnswerArgs, Cli};
pub use error::{CliError, CliResult};
