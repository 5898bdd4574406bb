use crate::cli::output::{info, section};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    for entry in registry.entries() {
        info(format!("  {:<10} {}", entry.name, entry.summary));
    }
    info("Positions are zero-based, as shown by `list`.");
    info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    section(format!("Help: {}", entry.name));
    info(format!("  {}", entry.summary));
    info(format!("  Usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        info(format!("  Aliases: {}", entry.aliases.join(", ")));
    }
}
