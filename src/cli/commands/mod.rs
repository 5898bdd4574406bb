pub mod config;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::{registry::CommandRegistry, shell_context::CommandError};

pub(crate) fn registry() -> CommandRegistry {
    transaction::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(config::definitions())
        .chain(system::definitions())
        .collect()
}

/// Parses a zero-based list position as printed by `list`.
pub(crate) fn parse_position(args: &[&str], usage: &str) -> Result<usize, CommandError> {
    match args {
        [raw] => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a list position"))
        }),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}
