//! Terminal drawing of dashboard snapshots.

use colored::Colorize;

use crate::{
    cli::output::{self, preferences},
    config::Config,
    core::services::{DistributionSlice, TrendPoint},
    ledger::TransactionKind,
    presentation::{DashboardSnapshot, Renderer},
};

const BAR_WIDTH: f64 = 24.0;

/// Prints a one-line balance after every update; full sections are printed on
/// request by the `list`, `summary` and `trend` commands.
pub struct TerminalRenderer {
    config: Config,
}

impl TerminalRenderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &DashboardSnapshot) {
        output::set_preferences(output::OutputPreferences {
            dark: snapshot.display_mode.is_dark(),
            ..preferences()
        });
        print_totals(snapshot, &self.config);
    }
}

pub fn print_totals(snapshot: &DashboardSnapshot, config: &Config) {
    let totals = snapshot.totals;
    output::info(format!(
        "Balance: {}  Income: {}  Expense: {}",
        config.format_amount(totals.balance),
        config.format_amount(totals.income),
        config.format_amount(totals.expense)
    ));
}

pub fn print_transactions(snapshot: &DashboardSnapshot, config: &Config) {
    output::section("Transactions");
    if snapshot.transactions.is_empty() {
        output::info("No transactions yet. Use `add` to record one.");
        return;
    }
    for (position, txn) in snapshot.transactions.iter().enumerate() {
        let sign = match txn.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        let line = format!(
            "[{position}] {} {} ({}): {}{}",
            txn.date.format("%Y-%m-%d"),
            txn.text,
            txn.category,
            sign,
            config.format_amount(txn.amount)
        );
        output::info(line);
    }
}

pub fn print_distribution(snapshot: &DashboardSnapshot, config: &Config) {
    output::section(format!("Distribution ({})", snapshot.period));
    if snapshot.distribution.is_empty() {
        output::info("Nothing recorded for this period.");
        return;
    }
    let total: f64 = snapshot.distribution.iter().map(|slice| slice.amount).sum();
    for slice in &snapshot.distribution {
        let share = if total > 0.0 { slice.amount / total } else { 0.0 };
        output::info(format!(
            "{:<14} {} {:>5.1}%  {}",
            slice.label,
            paint_bar(slice, share),
            share * 100.0,
            config.format_amount(slice.amount)
        ));
    }
}

pub fn print_trend(snapshot: &DashboardSnapshot, config: &Config) {
    output::section(format!("Last {} days", snapshot.trend.len()));
    let peak = snapshot
        .trend
        .iter()
        .map(|point| point.income.max(point.expense))
        .fold(0.0_f64, f64::max);
    for point in &snapshot.trend {
        output::info(trend_line(point, peak, config));
    }
}

fn trend_line(point: &TrendPoint, peak: f64, config: &Config) -> String {
    let scale = |value: f64| {
        if peak > 0.0 {
            ((value / peak) * BAR_WIDTH / 2.0).round() as usize
        } else {
            0
        }
    };
    let income = "+".repeat(scale(point.income));
    let expense = "-".repeat(scale(point.expense));
    let (income, expense) = if preferences().plain {
        (income, expense)
    } else {
        (income.green().to_string(), expense.red().to_string())
    };
    format!(
        "{:>5} {}{} in {} out {}",
        point.label,
        income,
        expense,
        config.format_amount(point.income),
        config.format_amount(point.expense)
    )
}

fn paint_bar(slice: &DistributionSlice, share: f64) -> String {
    let width = (share * BAR_WIDTH).round() as usize;
    let bar = "#".repeat(width);
    if preferences().plain {
        return format!("{bar:<24}");
    }
    let padded = format!("{bar:<24}");
    match hex_to_rgb(slice.color) {
        Some((r, g, b)) => padded.truecolor(r, g, b).to_string(),
        None => padded,
    }
}

fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_colors() {
        assert_eq!(hex_to_rgb("#28a745"), Some((0x28, 0xa7, 0x45)));
        assert_eq!(hex_to_rgb("28a745"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }
}
