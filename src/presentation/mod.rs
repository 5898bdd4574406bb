//! Contract between the ledger core and whatever draws it.
//!
//! A renderer always receives a complete [`DashboardSnapshot`] and redraws from
//! scratch; it never sees incremental changes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    core::services::{DistributionSlice, Totals, TrendPoint},
    ledger::{ReportPeriod, Transaction},
};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Display preference persisted alongside the ledger.
pub enum DisplayMode {
    #[default]
    #[serde(rename = "disabled")]
    Light,
    #[serde(rename = "enabled")]
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == DisplayMode::Dark
    }

    /// Stored flag value, written without JSON quoting.
    pub fn flag(self) -> &'static str {
        match self {
            DisplayMode::Light => "disabled",
            DisplayMode::Dark => "enabled",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    /// Accepts the bare flag as well as its JSON-quoted form.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let flag = raw.trim();
        let flag = flag
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(flag);
        match flag {
            "enabled" => Ok(DisplayMode::Dark),
            "disabled" => Ok(DisplayMode::Light),
            other => Err(format!("unknown display flag `{other}`")),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        };
        f.write_str(label)
    }
}

/// Everything a renderer needs to draw the list, the distribution and the trend.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSnapshot {
    /// Full ledger in current order; list positions are indices into this.
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    /// Period the distribution was computed for.
    pub period: ReportPeriod,
    pub distribution: Vec<DistributionSlice>,
    pub trend: Vec<TrendPoint>,
    pub display_mode: DisplayMode,
}

/// Receives snapshots after every mutation or period change.
pub trait Renderer {
    fn render(&mut self, snapshot: &DashboardSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mode_uses_flag_strings_on_the_wire() {
        assert_eq!(serde_json::to_string(&DisplayMode::Dark).unwrap(), "\"enabled\"");
        assert_eq!(
            serde_json::from_str::<DisplayMode>("\"disabled\"").unwrap(),
            DisplayMode::Light
        );
        assert_eq!(DisplayMode::Light.toggled(), DisplayMode::Dark);
        assert!(DisplayMode::Light.toggled().is_dark());
    }

    #[test]
    fn stored_flag_parses_bare_or_quoted() {
        assert_eq!("enabled".parse(), Ok(DisplayMode::Dark));
        assert_eq!(" \"disabled\"\n".parse(), Ok(DisplayMode::Light));
        assert!("\"sepia\"".parse::<DisplayMode>().is_err());
        assert!("\"enabled".parse::<DisplayMode>().is_err());
        assert_eq!(DisplayMode::Dark.flag(), "enabled");
    }
}
