use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    Particles,
    Waves,
    Matrix,
}

impl BackgroundMode {
    pub const ALL: [BackgroundMode; 3] = [
        BackgroundMode::Particles,
        BackgroundMode::Waves,
        BackgroundMode::Matrix,
    ];

    pub fn next(self) -> Self {
        match self {
            BackgroundMode::Particles => BackgroundMode::Waves,
            BackgroundMode::Waves => BackgroundMode::Matrix,
            BackgroundMode::Matrix => BackgroundMode::Particles,
        }
    }
}

impl FromStr for BackgroundMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "particles" => Ok(BackgroundMode::Particles),
            "waves" => Ok(BackgroundMode::Waves),
            "matrix" => Ok(BackgroundMode::Matrix),
            _ => Err(anyhow::anyhow!("Invalid background mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Dark,
    Light,
}

/// Read-only copy handed to renderers; they never write back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectsSnapshot {
    pub mode: BackgroundMode,
    pub audio_enabled: bool,
    pub theme: Theme,
}

/// Presentation collaborator driving the decorative background.
pub trait BackgroundEffects: std::fmt::Debug {
    fn set_mode(&mut self, mode: BackgroundMode);
    fn toggle_audio(&mut self);
    fn toggle_theme(&mut self);
    fn snapshot(&self) -> EffectsSnapshot;

    fn cycle_mode(&mut self) {
        let next = self.snapshot().mode.next();
        self.set_mode(next);
    }
}

/// Default controller: keeps the selected state for renderers to poll.
#[derive(Debug, Clone)]
pub struct EffectsController {
    state: EffectsSnapshot,
}

impl EffectsController {
    pub fn new(mode: BackgroundMode) -> Self {
        Self {
            state: EffectsSnapshot {
                mode,
                audio_enabled: false,
                theme: Theme::Dark,
            },
        }
    }
}

impl BackgroundEffects for EffectsController {
    fn set_mode(&mut self, mode: BackgroundMode) {
        debug!(from = ?self.state.mode, to = ?mode, "Background mode changed");
        self.state.mode = mode;
    }

    fn toggle_audio(&mut self) {
        self.state.audio_enabled = !self.state.audio_enabled;
        debug!(audio_enabled = self.state.audio_enabled, "Audio toggled");
    }

    fn toggle_theme(&mut self) {
        self.state.theme = match self.state.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        debug!(theme = ?self.state.theme, "Theme toggled");
    }

    fn snapshot(&self) -> EffectsSnapshot {
        self.state
    }
}
