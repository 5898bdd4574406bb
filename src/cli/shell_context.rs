//! Shared runtime state for CLI interactions and command execution.

use std::{env, io};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::{
        time::{Clock, FixedClock, SystemClock},
        LedgerManager,
    },
    errors::LedgerError,
    ledger::{parse_timestamp, TransactionDraft},
    storage::JsonStorage,
};

use super::{
    commands,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
    render::TerminalRenderer,
};

/// Pins the shell clock, mainly for reproducible scripted runs.
const CLOCK_OVERRIDE_ENV: &str = "POCKET_LEDGER_NOW";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("exit requested")]
    ExitRequested,
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}

pub type CommandResult = Result<(), CommandError>;

pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub theme: ColorfulTheme,
    /// Fields of the entry most recently taken out by `edit`.
    pub pending_draft: Option<TransactionDraft>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
            dark: false,
        });

        let config_manager = ConfigManager::new()?;
        let config = config_manager.load().unwrap_or_else(|err| {
            output::warning(format!("Ignoring unreadable configuration: {err}"));
            Config::default()
        });
        let data_dir = config.resolve_data_dir(config_manager.base_dir());
        let storage = JsonStorage::new(data_dir)?;
        let manager = LedgerManager::new(Box::new(storage), resolve_clock(), &config)
            .with_renderer(Box::new(TerminalRenderer::new(config.clone())));

        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
            dark: manager.display_mode().is_dark(),
        });

        Ok(Self {
            mode,
            registry: commands::registry(),
            manager,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            pending_draft: None,
            running: true,
        })
    }

    pub fn command_words(&self) -> Vec<&'static str> {
        self.registry.words()
    }

    pub fn prompt(&self) -> String {
        let count = self.manager.transactions().len();
        if self.pending_draft.is_some() {
            format!("ledger ({count}, editing)> ")
        } else {
            format!("ledger ({count})> ")
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.resolve(command).map(|entry| entry.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(&input.to_lowercase()) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    /// Asks before destructive actions; scripted runs always proceed.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            CommandError::Core(LedgerError::Validation(message)) => output::error(message),
            CommandError::Core(err @ LedgerError::OutOfRange { .. }) => {
                output::error(err);
                output::info("Positions change after every delete; run `list` to refresh them.");
            }
            other => output::error(other),
        }
    }
}

fn resolve_clock() -> Box<dyn Clock> {
    match env::var(CLOCK_OVERRIDE_ENV) {
        Ok(raw) => match parse_timestamp(&raw) {
            Some(instant) => {
                tracing::debug!(%instant, "using pinned clock");
                Box::new(FixedClock(instant))
            }
            None => {
                output::warning(format!("Ignoring invalid {CLOCK_OVERRIDE_ENV} value `{raw}`"));
                Box::new(SystemClock)
            }
        },
        Err(_) => Box::new(SystemClock),
    }
}
