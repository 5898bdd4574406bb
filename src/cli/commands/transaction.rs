use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::errors::LedgerError;
use crate::ledger::{TransactionDraft, TransactionKind};

use super::parse_position;

const ADD_USAGE: &str = "add <income|expense> <amount> <text> [category]";
const EDIT_USAGE: &str = "edit <position>";
const RESUBMIT_USAGE: &str = "resubmit [amount] [text] [category]";
const DELETE_USAGE: &str = "delete <position>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "edit",
            "Take an entry out of the ledger for re-entry",
            EDIT_USAGE,
            cmd_edit,
        ),
        CommandEntry::new(
            "resubmit",
            "Save the entry taken by `edit`, optionally changing fields",
            RESUBMIT_USAGE,
            cmd_resubmit,
        ),
        CommandEntry::new("delete", "Remove an entry", DELETE_USAGE, cmd_delete)
            .aliased(&["rm"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 || args.len() > 4 {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    }
    let kind: TransactionKind = args[0].parse().map_err(CommandError::InvalidArguments)?;
    let amount = parse_amount(args[1]);
    let text = args.get(2).copied().unwrap_or_default();
    let category = args.get(3).map(|value| value.to_string());

    context
        .manager
        .add_transaction(TransactionDraft::new(text, amount, kind, category))?;
    output::success("Transaction added.");
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let position = parse_position(args, EDIT_USAGE)?;
    if let Some(previous) = context.pending_draft.take() {
        output::warning(format!("Discarding unsaved edit of `{}`.", previous.text));
    }
    let draft = context.manager.edit_transaction(position)?;
    print_draft(&draft, context);
    output::info("Use `resubmit` to save it again, with any changed fields.");
    context.pending_draft = Some(draft);
    Ok(())
}

fn cmd_resubmit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 3 {
        return Err(CommandError::InvalidArguments(format!("usage: {RESUBMIT_USAGE}")));
    }
    let mut draft = context.pending_draft.take().ok_or_else(|| {
        CommandError::InvalidArguments("Nothing to resubmit; use `edit <position>` first.".into())
    })?;
    if let Some(raw) = args.first() {
        draft.amount = parse_amount(raw);
    }
    if let Some(text) = args.get(1) {
        draft.text = text.to_string();
    }
    if let Some(category) = args.get(2) {
        draft.category = Some(category.to_string());
    }

    match context.manager.add_transaction(draft.clone()) {
        Ok(_) => {
            output::success("Transaction saved.");
            Ok(())
        }
        Err(err @ LedgerError::Validation(_)) => {
            context.pending_draft = Some(draft);
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let position = parse_position(args, DELETE_USAGE)?;
    if let Some(txn) = context.manager.transactions().get(position) {
        let prompt = format!("Delete [{position}] {}?", txn.text);
        if !context.confirm(&prompt)? {
            output::info("Deletion cancelled.");
            return Ok(());
        }
    }
    let removed = context.manager.delete_transaction(position)?;
    output::success(format!("Deleted `{}`.", removed.text));
    Ok(())
}

/// Non-numeric input becomes a missing amount, which validation rejects.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn print_draft(draft: &TransactionDraft, context: &ShellContext) {
    output::section("Editing");
    output::info(format!("  Text    : {}", draft.text));
    let amount = draft
        .amount
        .map(|value| context.config.format_amount(value))
        .unwrap_or_default();
    output::info(format!("  Amount  : {amount}"));
    output::info(format!("  Type    : {}", draft.kind));
    output::info(format!(
        "  Category: {}",
        draft.category.as_deref().unwrap_or_default()
    ));
}
