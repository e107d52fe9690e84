use crate::config::Config;
use crate::contact::ContactForm;
use crate::desktop::context_menu::{ContextMenu, MenuAction};
use crate::desktop::ui_state::UiFlags;
use crate::effects::{BackgroundEffects, EffectsController};
use crate::terminal::shell::TerminalShell;
use crate::window::manager::{IconSignal, WindowManager};
use crate::window::registry::WindowRegistry;
use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

/// Everything one visitor's desktop owns. Built explicitly; nothing is global.
#[derive(Debug)]
pub struct DesktopSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    windows: WindowManager<Vec<IconSignal>>,
    shell: TerminalShell,
    effects: Box<dyn BackgroundEffects + Send>,
    menu: ContextMenu,
    contact: ContactForm,
    ui: UiFlags,
}

impl DesktopSession {
    pub fn from_config(config: &Config) -> Self {
        let effects = EffectsController::new(config.initial_background);
        Self::with_effects(config, Box::new(effects))
    }

    pub fn with_effects(config: &Config, effects: Box<dyn BackgroundEffects + Send>) -> Self {
        let registry = WindowRegistry::from_manifest(config.window_manifest.iter().cloned());
        let menu = ContextMenu::for_windows(config.window_manifest.iter());
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            windows: WindowManager::new(registry, Vec::new()),
            shell: TerminalShell::from_config(config),
            effects,
            menu,
            contact: ContactForm::new(),
            ui: UiFlags::default(),
        };
        info!(session_id = %session.id, windows = config.window_manifest.len(), "Desktop session created");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn windows(&self) -> &WindowManager<Vec<IconSignal>> {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager<Vec<IconSignal>> {
        &mut self.windows
    }

    pub fn shell(&self) -> &TerminalShell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut TerminalShell {
        &mut self.shell
    }

    pub fn effects(&self) -> &dyn BackgroundEffects {
        self.effects.as_ref()
    }

    pub fn effects_mut(&mut self) -> &mut (dyn BackgroundEffects + Send) {
        self.effects.as_mut()
    }

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn ui(&self) -> &UiFlags {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiFlags {
        &mut self.ui
    }

    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn apply_menu_action(&mut self, action: &MenuAction) {
        match action {
            MenuAction::OpenWindow(id) => self.windows.show(id),
            MenuAction::CycleBackground => self.effects.cycle_mode(),
            MenuAction::ToggleTheme => self.effects.toggle_theme(),
            MenuAction::ToggleAudio => self.effects.toggle_audio(),
        }
    }

    /// Drains icon signals accumulated since the last call.
    pub fn take_icon_signals(&mut self) -> Vec<IconSignal> {
        std::mem::take(self.windows.icon_sync_mut())
    }
}
