use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        services::DEFAULT_TREND_DAYS,
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    errors::{LedgerError, Result},
    ledger::ReportPeriod,
};

/// User preferences that shape how the ledger is reported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Prefix printed before amounts. Display only; amounts stay unitless.
    pub currency_symbol: String,
    /// Length of the daily trend series.
    pub trend_days: u32,
    /// Period selected for the distribution report at startup.
    pub default_period: ReportPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for storage slots. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            trend_days: DEFAULT_TREND_DAYS,
            default_period: ReportPeriod::All,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::data_dir_in(base))
    }

    pub fn format_amount(&self, amount: f64) -> String {
        let rendered = format!("{:.2}", amount.abs());
        let rendered = rendered
            .strip_suffix(".00")
            .map(str::to_string)
            .unwrap_or(rendered);
        if amount < 0.0 {
            format!("-{}{}", self.currency_symbol, rendered)
        } else {
            format!("{}{}", self.currency_symbol, rendered)
        }
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| LedgerError::Config(err.to_string()))?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.trend_days, 30);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            currency_symbol: "$".into(),
            trend_days: 14,
            default_period: ReportPeriod::Monthly,
            data_dir: Some(dir.path().join("slots")),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(config.resolve_data_dir(dir.path()), dir.path().join("slots"));
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), r#"{"trend_days": 7}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.trend_days, 7);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), "{ nope").unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }

    #[test]
    fn amounts_are_prefixed_with_symbol() {
        let config = Config::default();
        assert_eq!(config.format_amount(350.0), "₹350");
        assert_eq!(config.format_amount(12.5), "₹12.50");
        assert_eq!(config.format_amount(-40.0), "-₹40");
    }
}
