//! Terminal front-end driving the portfolio and signup forms.

pub mod output;
pub mod prompts;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use folio_config::{ConfigError, ConfigManager};
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::RequestError;
use crate::forms::{
    EditTarget, FormContext, FormController, PortfolioForm, PrefillState, SignupForm,
    SubmitOutcome,
};
use crate::navigation::ConsoleNavigator;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::utils::build_info;

pub use prompts::{DialoguerInput, FieldInput, ScriptInput};

/// Environment variable that switches the CLI to line-based script input.
pub const SCRIPT_ENV: &str = "FOLIO_ADMIN_CLI_SCRIPT";

pub const USAGE: &str = "Usage: folio_admin_cli [--config <file.json>] <command>\n\
     Commands:\n  \
     portfolio [--id <ID>]   add a portfolio item, or edit the one with <ID>\n  \
     signup                  create an account\n  \
     --version               print build information";

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    Portfolio { id: Option<String> },
    Signup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

/// Parses the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config_path = None;
    let mut command = None;
    let mut id = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => command = Some(Command::Version),
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a file path".into()))?;
                config_path = Some(PathBuf::from(path));
            }
            "--id" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--id needs a value".into()))?;
                id = Some(value);
            }
            "portfolio" if command.is_none() => command = Some(Command::Portfolio { id: None }),
            "signup" if command.is_none() => command = Some(Command::Signup),
            other => return Err(CliError::Usage(format!("Unknown argument `{other}`"))),
        }
    }

    let command = match (command, id) {
        (Some(Command::Portfolio { .. }), id) => Command::Portfolio { id },
        (Some(_), Some(_)) => {
            return Err(CliError::Usage("--id only applies to `portfolio`".into()))
        }
        (Some(command), None) => command,
        (None, _) => return Err(CliError::Usage("Missing command".into())),
    };

    Ok(Invocation {
        config_path,
        command,
    })
}

/// Runs one invocation to completion.
pub async fn run_cli(invocation: Invocation) -> Result<(), CliError> {
    if invocation.command == Command::Version {
        println!("{}", build_info::current().summary());
        return Ok(());
    }

    let manager = match invocation.config_path {
        Some(path) => ConfigManager::new(path),
        None => ConfigManager::default_location(),
    };
    let mut config = manager.load()?;
    config.apply_env_overrides()?;
    config.validate()?;
    info!(base_uri = %config.api.base_uri, "configuration loaded");

    let mode = CliMode::from_env();
    output::set_plain(mode == CliMode::Script);
    let notifier: Arc<dyn Notifier> = match mode {
        CliMode::Interactive => Arc::new(ConsoleNotifier::new()),
        CliMode::Script => Arc::new(ConsoleNotifier::plain()),
    };
    let ctx = FormContext::from_config(&config, notifier, Arc::new(ConsoleNavigator))?;

    let mut input: Box<dyn FieldInput> = match mode {
        CliMode::Interactive => Box::new(DialoguerInput::new()),
        CliMode::Script => Box::new(ScriptInput::new(io::stdin().lock())),
    };

    let outcome = match invocation.command {
        Command::Portfolio { id } => {
            let form = PortfolioForm::new(ctx, id.as_deref().and_then(EditTarget::new));
            form.load().await;
            if form.mode().is_edit() && form.prefill_state() == PrefillState::Unfilled {
                debug!("edit target not prefilled; continuing with an empty form");
            }
            drive_form(&form, input.as_mut()).await?
        }
        Command::Signup => drive_form(&SignupForm::new(ctx), input.as_mut()).await?,
        Command::Version => None,
    };

    report(outcome)
}

/// Prompts, submits and re-prompts until the form is submitted, the user
/// declines to retry a failed request, or the form is cancelled (`None`).
pub async fn drive_form(
    controller: &dyn FormController,
    input: &mut dyn FieldInput,
) -> Result<Option<SubmitOutcome>, CliError> {
    output::section(controller.heading());
    prompts::fill_fields(controller, input, None)?;

    loop {
        let proceed = input.confirm(&format!("{}?", controller.submit_label()), true)?;
        if !proceed {
            controller.cancel();
            return Ok(None);
        }

        let outcome = controller.submit().await;
        match &outcome {
            SubmitOutcome::Invalid(errors) => prompts::fill_fields(controller, input, Some(errors))?,
            SubmitOutcome::Failed(_) if input.confirm("Try again?", false)? => {}
            _ => return Ok(Some(outcome)),
        }
    }
}

fn report(outcome: Option<SubmitOutcome>) -> Result<(), CliError> {
    match outcome {
        None => output::info("Cancelled."),
        Some(SubmitOutcome::Failed(err)) => return Err(err.into()),
        Some(SubmitOutcome::Rejected(message)) => {
            info!(message = ?message, "submission answered without success");
        }
        Some(SubmitOutcome::Busy) => output::warning("A submission is already in progress"),
        Some(SubmitOutcome::Submitted) | Some(SubmitOutcome::Invalid(_)) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_portfolio_with_id_and_config() {
        let invocation =
            parse_args(args(&["--config", "cfg.json", "portfolio", "--id", "X"])).unwrap();
        assert_eq!(invocation.config_path, Some(PathBuf::from("cfg.json")));
        assert_eq!(
            invocation.command,
            Command::Portfolio {
                id: Some("X".into())
            }
        );
    }

    #[test]
    fn parses_signup_and_version() {
        assert_eq!(parse_args(args(&["signup"])).unwrap().command, Command::Signup);
        assert_eq!(
            parse_args(args(&["--version"])).unwrap().command,
            Command::Version
        );
    }

    #[test]
    fn rejects_missing_or_unknown_commands() {
        assert!(matches!(parse_args(args(&[])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(args(&["deploy"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(args(&["signup", "--id", "X"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(args(&["--config"])),
            Err(CliError::Usage(_))
        ));
    }
}
