use crate::terminal::output::OutputBlock;
use serde::Serialize;

/// Who the terminal session presents itself as; the only state handlers may read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    pub user: String,
    pub host: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_role: String,
    pub available: bool,
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self {
            user: "visitor".to_string(),
            host: "portfolio".to_string(),
            owner_name: "Alex Tran".to_string(),
            owner_email: "hello@alextran.dev".to_string(),
            owner_role: "Creative Developer".to_string(),
            available: true,
        }
    }
}

impl SessionIdentity {
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$ ", self.user, self.host)
    }
}

pub struct CommandContext<'a> {
    pub identity: &'a SessionIdentity,
    pub registry: &'a CommandRegistry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Print(OutputBlock),
    /// Truncates the transcript; appends nothing.
    ClearScreen,
}

pub type Handler = fn(&CommandContext<'_>, &[String]) -> CommandOutcome;

#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub summary: String,
    pub handler: Handler,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish()
    }
}

/// Lowercase command name to handler, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under the lowercased `name`, replacing any earlier entry.
    pub fn register(&mut self, name: &str, summary: &str, handler: Handler) {
        let name = name.to_lowercase();
        let command = Command {
            name: name.clone(),
            summary: summary.to_string(),
            handler,
        };
        match self.commands.iter_mut().find(|c| c.name == name) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name.as_str())
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Closest registered name by Jaro-Winkler similarity, if it reaches `threshold`.
    pub fn suggest(&self, token: &str, threshold: f64) -> Option<&str> {
        self.commands
            .iter()
            .map(|c| (c.name.as_str(), strsim::jaro_winkler(token, &c.name)))
            .filter(|(_, score)| *score >= threshold)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
