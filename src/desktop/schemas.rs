//! Wire types for the JSON event loop: one `DesktopEvent` per input line,
//! one `DesktopResponse` per output line.

use crate::contact::Banner;
use crate::desktop::context_menu::MenuItem;
use crate::desktop::ui_state::UiFlags;
use crate::effects::{BackgroundMode, EffectsSnapshot};
use crate::error::AppError;
use crate::terminal::output::OutputBlock;
use crate::terminal::shell::{Prompt, SubmitOutcome};
use crate::window::manager::IconSignal;
use crate::window::registry::{Window, WindowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum DesktopEvent {
    // Windows
    ShowWindow { window: WindowId },
    HideWindow { window: WindowId },
    ToggleWindow { window: WindowId },
    MinimizeWindow { window: WindowId },
    MaximizeWindow { window: WindowId },
    RestoreWindow { window: WindowId },
    // Terminal
    TerminalInput { text: String },
    TerminalBackspace,
    /// Without `line`, the current input buffer is submitted.
    TerminalSubmit {
        #[serde(default)]
        line: Option<String>,
    },
    TerminalHistory { step: i32 },
    // Desktop
    ContextMenu { index: usize },
    SetBackground { mode: BackgroundMode },
    CycleBackground,
    ToggleAudio,
    ToggleTheme,
    // Contact form
    ContactSet { field: String, value: String },
    ContactFocus { field: String },
    ContactBlur { field: String },
    ContactSubmit,
    // Page chrome
    Scroll { offset: f64 },
    KeyDown { key: String },
    MouseDown,
    ToggleMobileMenu,
    FollowNavLink,
    Snapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminalView {
    pub prompt: Prompt,
    pub prompt_text: String,
    pub input_buffer: String,
    pub history_cursor: isize,
    pub history: Vec<String>,
    pub transcript: Vec<OutputBlock>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DesktopSnapshot {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub active_window: Option<WindowId>,
    pub windows: Vec<Window>,
    pub terminal: TerminalView,
    pub effects: EffectsSnapshot,
    pub ui: UiFlags,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DesktopResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icon_changes: Vec<IconSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<SubmitOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_buffer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectsSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<DesktopSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl DesktopResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        Self {
            ok: false,
            error: Some(ErrorBody::from(err)),
            ..Default::default()
        }
    }
}
