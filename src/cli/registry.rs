use strsim::levenshtein;

use crate::cli::shell_context::{CommandResult, ShellContext};

/// Furthest edit distance at which an unknown word still earns a suggestion.
const SUGGESTION_DISTANCE: usize = 3;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub summary: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        summary: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            summary,
            usage,
            handler,
        }
    }

    pub const fn aliased(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.aliases.iter().any(|alias| *alias == word)
    }
}

/// Commands in registration order, which is also the order `help` lists them.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Looks a command up by name or alias.
    pub fn resolve(&self, word: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.answers_to(word))
    }

    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Every word the shell accepts, for completion.
    pub fn words(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::once(entry.name).chain(entry.aliases.iter().copied()))
            .collect()
    }

    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        self.names()
            .map(|name| (levenshtein(name, input), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

impl FromIterator<CommandEntry> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = CommandEntry>>(iter: I) -> Self {
        let mut registry = Self::default();
        for entry in iter {
            if registry.resolve(entry.name).is_some() {
                tracing::warn!(command = entry.name, "duplicate command ignored");
                continue;
            }
            registry.entries.push(entry);
        }
        registry
    }
}
