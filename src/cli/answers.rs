//! Answer collection: interactive prompts or command-line flags
//!
//! Prompt order is fixed: name, language variant, then one confirm per
//! optional feature, each defaulting to "no".

use crate::cli::args::AnswerArgs;
use crate::cli::{CliError, CliResult};
use crate::domain::{Answers, Language, ProjectName};
use crate::infrastructure::traits::Prompter;
use crate::infrastructure::InfraError;

pub const NAME_PROMPT: &str = "Project Name:";
pub const VARIANT_PROMPT: &str = "Select Variant:";
pub const MONGOOSE_PROMPT: &str = "Would you like to include Mongoose?";
pub const ESLINT_PROMPT: &str = "Would you like to include ESLint?";
pub const PRETTIER_PROMPT: &str = "Would you like to include Prettier?";

const NAME_HINT: &str =
    "Project name may only include letters, numbers, underscores, hyphens, hashes, or './' for the current directory.";

/// Resolve answers from flags if they make prompting unnecessary, else ask.
pub fn resolve(args: &AnswerArgs, prompter: &dyn Prompter) -> CliResult<Answers> {
    if args.skip_prompts() {
        from_args(args)
    } else {
        ask(prompter)
    }
}

/// Build answers from flags alone.
pub fn from_args(args: &AnswerArgs) -> CliResult<Answers> {
    let name = args.name.as_deref().ok_or_else(|| {
        CliError::InvalidArgs("--name is required with --no-interactive".to_string())
    })?;

    Ok(Answers {
        name: ProjectName::parse(name)?,
        language: args.variant.map(Language::from).unwrap_or(Language::JavaScript),
        mongoose: args.mongoose,
        eslint: args.eslint,
        prettier: args.prettier,
    })
}

/// Run the interactive question sequence.
pub fn ask(prompter: &dyn Prompter) -> CliResult<Answers> {
    let validate = |input: &str| -> Result<(), String> {
        if ProjectName::is_valid(input) {
            Ok(())
        } else {
            Err(NAME_HINT.to_string())
        }
    };
    let raw_name = prompter.input(NAME_PROMPT, &validate).map_err(prompt_err)?;
    let name = ProjectName::parse(&raw_name)?;

    let labels: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();
    let index = prompter
        .select(VARIANT_PROMPT, &labels, 0)
        .map_err(prompt_err)?;
    let language = Language::ALL
        .get(index)
        .copied()
        .ok_or_else(|| prompt_err(format!("variant index out of range: {index}")))?;

    Ok(Answers {
        name,
        language,
        mongoose: prompter.confirm(MONGOOSE_PROMPT, false).map_err(prompt_err)?,
        eslint: prompter.confirm(ESLINT_PROMPT, false).map_err(prompt_err)?,
        prettier: prompter.confirm(PRETTIER_PROMPT, false).map_err(prompt_err)?,
    })
}

fn prompt_err(message: String) -> CliError {
    CliError::Infra(InfraError::Prompt { message })
}
