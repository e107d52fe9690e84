use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Output,
    Error,
    Warning,
}

/// One rendered unit of terminal output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputBlock {
    pub kind: BlockKind,
    pub lines: Vec<String>,
}

impl OutputBlock {
    pub fn new(kind: BlockKind, text: &str) -> Self {
        Self {
            kind,
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn output(text: &str) -> Self {
        Self::new(BlockKind::Output, text)
    }

    pub fn error(text: &str) -> Self {
        Self::new(BlockKind::Error, text)
    }

    pub fn warning(text: &str) -> Self {
        Self::new(BlockKind::Warning, text)
    }

    pub fn from_lines(kind: BlockKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}
