use crate::config::Config;
use crate::terminal::guard::DangerousPatterns;
use crate::terminal::output::OutputBlock;
use crate::terminal::registry::{CommandContext, CommandOutcome, CommandRegistry, SessionIdentity};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryDirection {
    /// Up arrow.
    Older,
    /// Down arrow.
    Newer,
}

impl HistoryDirection {
    /// `-1` walks back in time, `+1` forward.
    pub fn from_step(step: i32) -> Option<Self> {
        match step {
            -1 => Some(HistoryDirection::Older),
            1 => Some(HistoryDirection::Newer),
            _ => None,
        }
    }
}

/// The input line currently offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub id: u64,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SubmitStatus {
    Empty,
    Refused { pattern: String },
    Executed { command: String },
    Cleared,
    NotFound { command: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    #[serde(flatten)]
    pub status: SubmitStatus,
    /// The prompt the line was typed into; `disabled` is set on refusal.
    pub retired_prompt: Prompt,
    /// Blocks appended to the transcript by this submission.
    pub blocks: Vec<OutputBlock>,
}

#[derive(Debug, Clone, Default)]
pub struct TerminalSession {
    history: Vec<String>,
    // Steps back from the newest history entry; `None` is the fresh line.
    history_steps: Option<usize>,
    transcript: Vec<OutputBlock>,
    input_buffer: String,
}

impl TerminalSession {
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Index into `history` of the recalled entry, or `-1` on a fresh line.
    pub fn history_cursor(&self) -> isize {
        match self.history_steps {
            Some(steps) => (self.history.len() - 1 - steps) as isize,
            None => -1,
        }
    }

    pub fn transcript(&self) -> &[OutputBlock] {
        &self.transcript
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }
}

/// Line-oriented command interpreter over a `CommandRegistry`.
#[derive(Debug)]
pub struct TerminalShell {
    registry: CommandRegistry,
    guard: DangerousPatterns,
    identity: SessionIdentity,
    suggestion_threshold: f64,
    session: TerminalSession,
    prompt: Prompt,
}

impl TerminalShell {
    pub fn new(
        registry: CommandRegistry,
        guard: DangerousPatterns,
        identity: SessionIdentity,
        suggestion_threshold: f64,
    ) -> Self {
        Self {
            registry,
            guard,
            identity,
            suggestion_threshold,
            session: TerminalSession::default(),
            prompt: Prompt { id: 0, disabled: false },
        }
    }

    /// Shell with the built-in commands, configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CommandRegistry::with_builtins(),
            config.dangerous_patterns.clone(),
            config.identity.clone(),
            config.suggestion_threshold,
        )
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub fn prompt_text(&self) -> String {
        self.identity.prompt()
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn type_input(&mut self, text: &str) {
        self.session.input_buffer.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.session.input_buffer.pop();
    }

    pub fn set_input(&mut self, text: &str) {
        self.session.input_buffer = text.to_string();
    }

    /// Submits whatever is in the input buffer.
    pub fn submit_buffer(&mut self) -> SubmitOutcome {
        let line = std::mem::take(&mut self.session.input_buffer);
        self.submit(&line)
    }

    #[instrument(skip(self), fields(prompt = self.prompt.id))]
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        let line = line.trim();
        let mut retired_prompt = self.prompt;
        let transcript_len = self.session.transcript.len();

        let status = if line.is_empty() {
            SubmitStatus::Empty
        } else if let Some(pattern) = self.guard.matches(line) {
            warn!(pattern = %pattern, "Refusing command matching dangerous pattern");
            retired_prompt.disabled = true;
            self.session.transcript.push(OutputBlock::warning(&format!(
                "Permission denied: '{}' is not allowed here.\n\
                 Nice try! This is a portfolio, not a real server.",
                pattern
            )));
            SubmitStatus::Refused {
                pattern: pattern.to_string(),
            }
        } else {
            self.dispatch(line)
        };

        self.session.input_buffer.clear();
        self.session.history_steps = None;
        self.prompt = Prompt {
            id: retired_prompt.id + 1,
            disabled: false,
        };

        // After `clear` the transcript is empty, so nothing new to report.
        let blocks = self
            .session
            .transcript
            .get(transcript_len..)
            .map(<[OutputBlock]>::to_vec)
            .unwrap_or_default();

        SubmitOutcome {
            status,
            retired_prompt,
            blocks,
        }
    }

    fn dispatch(&mut self, line: &str) -> SubmitStatus {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default().to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        self.session.history.push(line.to_string());

        let Some(entry) = self.registry.lookup(&command) else {
            info!(command = %command, "Command not found");
            let mut message = format!("Command not found: {}", command);
            if let Some(suggestion) = self.registry.suggest(&command, self.suggestion_threshold) {
                message.push_str(&format!("\nDid you mean '{}'?", suggestion));
            }
            message.push_str("\nType 'help' to see available commands.");
            self.session.transcript.push(OutputBlock::error(&message));
            return SubmitStatus::NotFound { command };
        };

        debug!(command = %command, args = ?args, "Dispatching command");
        let ctx = CommandContext {
            identity: &self.identity,
            registry: &self.registry,
        };
        match (entry.handler)(&ctx, &args) {
            CommandOutcome::Print(block) => {
                self.session.transcript.push(block);
                SubmitStatus::Executed { command }
            }
            CommandOutcome::ClearScreen => {
                self.session.transcript.clear();
                SubmitStatus::Cleared
            }
        }
    }

    /// Up/down recall. Walking past the newest entry leaves an empty buffer.
    pub fn navigate_history(&mut self, direction: HistoryDirection) {
        let len = self.session.history.len();
        if len == 0 {
            return;
        }

        let steps = match (direction, self.session.history_steps) {
            (HistoryDirection::Older, None) => Some(0),
            (HistoryDirection::Older, Some(s)) => Some((s + 1).min(len - 1)),
            (HistoryDirection::Newer, None) | (HistoryDirection::Newer, Some(0)) => None,
            (HistoryDirection::Newer, Some(s)) => Some(s - 1),
        };

        self.session.history_steps = steps;
        self.session.input_buffer = match steps {
            Some(s) => self.session.history[len - 1 - s].clone(),
            None => String::new(),
        };
    }
}
