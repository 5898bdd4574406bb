use std::path::PathBuf;

use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::config::Config;
use crate::core::services::MAX_TREND_DAYS;
use crate::ledger::ReportPeriod;

const CONFIG_USAGE: &str = "config [show|set <currency|trend_days|period|data_dir> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change saved preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let mut updated = context.config_manager.load()?;
            apply_setting(&mut updated, key, &value.join(" "))?;
            context.config_manager.save(&updated)?;
            tracing::info!(key = *key, "configuration updated");
            output::success(format!(
                "Saved `{key}`. It takes effect the next time the shell starts."
            ));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {CONFIG_USAGE}"))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  currency   : {}", config.currency_symbol));
    output::info(format!("  trend_days : {}", config.trend_days));
    output::info(format!("  period     : {}", config.default_period));
    let data_dir = config.resolve_data_dir(context.config_manager.base_dir());
    output::info(format!("  data_dir   : {}", data_dir.display()));
    output::info(format!(
        "  file       : {}",
        context.config_manager.config_path().display()
    ));
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<(), CommandError> {
    let value = value.trim();
    match key.to_ascii_lowercase().as_str() {
        "currency" | "currency_symbol" => config.currency_symbol = value.to_string(),
        "trend_days" => {
            config.trend_days = value
                .parse::<u32>()
                .ok()
                .filter(|days| (1..=MAX_TREND_DAYS).contains(days))
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "trend_days must be a whole number from 1 to {MAX_TREND_DAYS}"
                    ))
                })?;
        }
        "period" | "default_period" => {
            config.default_period = value
                .parse::<ReportPeriod>()
                .map_err(CommandError::InvalidArguments)?;
        }
        "data_dir" => {
            config.data_dir = match value {
                "" | "default" => None,
                path => Some(PathBuf::from(path)),
            };
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{other}`; expected currency, trend_days, period or data_dir"
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_are_validated() {
        let mut config = Config::default();
        apply_setting(&mut config, "currency", "€").unwrap();
        apply_setting(&mut config, "trend_days", "14").unwrap();
        apply_setting(&mut config, "period", "week").unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.trend_days, 14);
        assert_eq!(config.default_period, ReportPeriod::Weekly);

        assert!(apply_setting(&mut config, "trend_days", "0").is_err());
        assert!(apply_setting(&mut config, "trend_days", "367").is_err());
        assert!(apply_setting(&mut config, "trend_days", "100000000").is_err());
        assert_eq!(config.trend_days, 14);
        apply_setting(&mut config, "trend_days", "366").unwrap();
        assert_eq!(config.trend_days, MAX_TREND_DAYS);
        assert!(apply_setting(&mut config, "period", "yearly").is_err());
        assert!(apply_setting(&mut config, "colour", "red").is_err());

        apply_setting(&mut config, "data_dir", "/tmp/ledger").unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/ledger")));
        apply_setting(&mut config, "data_dir", "default").unwrap();
        assert_eq!(config.data_dir, None);
    }
}
