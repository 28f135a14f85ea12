//! Command dispatch
//!
//! The tool does one thing, gated on a literal first argument. Anything else
//! prints a usage hint and succeeds without touching the filesystem.

use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::application::services::{GenerationContext, GenerationReport};
use crate::cli::args::{AnswerArgs, Cli};
use crate::cli::{answers, output, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// First argument that triggers generation.
pub const GATE_COMMAND: &str = "omega-one";

pub const USAGE_HINT: &str = "Please run with the 'create-omega omega-one' command.";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match cli.command.as_deref() {
        Some(GATE_COMMAND) => cmd_generate(cli),
        other => {
            debug!("execute_command: not gated, command={:?}", other);
            output::info(USAGE_HINT);
            Ok(())
        }
    }
}

#[instrument(skip(cli))]
fn cmd_generate(cli: &Cli) -> CliResult<()> {
    let working_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e))?,
    };
    let container = ServiceContainer::new(Settings::load()?);

    let report = generate(&container, &cli.answers, working_dir)?;
    print_report(&report);
    Ok(())
}

/// Collect answers and generate the project.
pub fn generate(
    container: &ServiceContainer,
    args: &AnswerArgs,
    working_dir: PathBuf,
) -> CliResult<GenerationReport> {
    let answers = answers::resolve(args, container.prompter.as_ref())?;
    debug!("generate: answers={:?}", answers);

    let ctx = GenerationContext { working_dir };
    Ok(container.generator().generate(&answers, &ctx)?)
}

fn print_report(report: &GenerationReport) {
    output::success(&format!(
        "Project created in {} using {}",
        report.project_dir.display(),
        report.language
    ));
    for feature in &report.features {
        output::success_detail(&format!("{} has been included.", feature));
    }
}
