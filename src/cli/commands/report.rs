use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::cli::shell_context::{CommandResult, ShellContext};
use crate::ledger::ReportPeriod;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "Show every entry with its position", "list", cmd_list)
            .aliased(&["ls"]),
        CommandEntry::new(
            "period",
            "Show or change the distribution period",
            "period [daily|weekly|monthly|all]",
            cmd_period,
        ),
        CommandEntry::new(
            "summary",
            "Show totals and the category distribution",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new("trend", "Show the daily income/expense trend", "trend", cmd_trend),
        CommandEntry::new("theme", "Toggle dark mode", "theme", cmd_theme),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render::print_transactions(&context.manager.snapshot(), &context.config);
    Ok(())
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!("Current period: {}", context.manager.period()));
        let options: Vec<String> = ReportPeriod::ALL.iter().map(|p| p.to_string()).collect();
        output::info(format!("Available: {}", options.join(", ")));
        return Ok(());
    };

    if raw.parse::<ReportPeriod>().is_err() {
        output::warning(format!("Unknown period `{raw}`; showing all entries."));
    }
    let period = ReportPeriod::parse_lenient(raw);
    let snapshot = context.manager.set_period(period);
    render::print_distribution(&snapshot, &context.config);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.manager.snapshot();
    output::section("Totals");
    render::print_totals(&snapshot, &context.config);
    render::print_distribution(&snapshot, &context.config);
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render::print_trend(&context.manager.snapshot(), &context.config);
    Ok(())
}

fn cmd_theme(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mode = context.manager.toggle_display_mode();
    output::success(format!("Switched to {mode} mode."));
    Ok(())
}
