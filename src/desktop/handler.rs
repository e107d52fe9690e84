use crate::config::Config;
use crate::contact::ContactField;
use crate::desktop::schemas::{DesktopEvent, DesktopResponse, DesktopSnapshot, TerminalView};
use crate::desktop::session::DesktopSession;
use crate::error::AppError;
use crate::terminal::shell::HistoryDirection;
use tracing::{debug, error, instrument};

/// Caller-owned dispatch: maps each inbound event onto one synchronous session method.
#[derive(Debug)]
pub struct DesktopHandler {
    session: DesktopSession,
}

impl DesktopHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            session: DesktopSession::from_config(config),
        }
    }

    pub fn from_session(session: DesktopSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &DesktopSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DesktopSession {
        &mut self.session
    }

    /// Parses and handles one JSON line. Failures become error responses; the loop keeps going.
    pub fn handle_line(&mut self, line: &str) -> DesktopResponse {
        let result = serde_json::from_str::<DesktopEvent>(line)
            .map_err(AppError::from)
            .and_then(|event| self.handle_event(event));
        match result {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to handle event");
                DesktopResponse::from_error(&e)
            }
        }
    }

    #[instrument(skip(self), fields(session_id = %self.session.id()))]
    pub fn handle_event(&mut self, event: DesktopEvent) -> Result<DesktopResponse, AppError> {
        debug!("Handling desktop event");
        let mut response = DesktopResponse::ok();
        let session = &mut self.session;

        match event {
            DesktopEvent::ShowWindow { window } => session.windows_mut().show(&window),
            DesktopEvent::HideWindow { window } => session.windows_mut().hide(&window),
            DesktopEvent::ToggleWindow { window } => session.windows_mut().toggle(&window),
            DesktopEvent::MinimizeWindow { window } => session.windows_mut().minimize(&window),
            DesktopEvent::MaximizeWindow { window } => session.windows_mut().maximize(&window),
            DesktopEvent::RestoreWindow { window } => session.windows_mut().restore(&window),

            DesktopEvent::TerminalInput { text } => {
                session.shell_mut().type_input(&text);
                response.input_buffer = Some(session.shell().session().input_buffer().to_string());
            }
            DesktopEvent::TerminalBackspace => {
                session.shell_mut().backspace();
                response.input_buffer = Some(session.shell().session().input_buffer().to_string());
            }
            DesktopEvent::TerminalSubmit { line } => {
                let outcome = match line {
                    Some(line) => session.shell_mut().submit(&line),
                    None => session.shell_mut().submit_buffer(),
                };
                response.terminal = Some(outcome);
            }
            DesktopEvent::TerminalHistory { step } => {
                let direction = HistoryDirection::from_step(step).ok_or_else(|| {
                    AppError::InvalidEvent(format!("history step must be -1 or 1, got {}", step))
                })?;
                session.shell_mut().navigate_history(direction);
                response.input_buffer = Some(session.shell().session().input_buffer().to_string());
            }

            DesktopEvent::ContextMenu { index } => {
                let action = session.menu().select(index)?.clone();
                session.apply_menu_action(&action);
                response.effects = Some(session.effects().snapshot());
            }
            DesktopEvent::SetBackground { mode } => {
                session.effects_mut().set_mode(mode);
                response.effects = Some(session.effects().snapshot());
            }
            DesktopEvent::CycleBackground => {
                session.effects_mut().cycle_mode();
                response.effects = Some(session.effects().snapshot());
            }
            DesktopEvent::ToggleAudio => {
                session.effects_mut().toggle_audio();
                response.effects = Some(session.effects().snapshot());
            }
            DesktopEvent::ToggleTheme => {
                session.effects_mut().toggle_theme();
                response.effects = Some(session.effects().snapshot());
            }

            DesktopEvent::ContactSet { field, value } => {
                let field: ContactField = field.parse()?;
                session.contact_mut().set_field(field, &value);
            }
            DesktopEvent::ContactFocus { field } => {
                let field: ContactField = field.parse()?;
                session.contact_mut().focus(field);
            }
            DesktopEvent::ContactBlur { field } => {
                let field: ContactField = field.parse()?;
                session.contact_mut().blur(field);
            }
            DesktopEvent::ContactSubmit => {
                response.banner = Some(session.contact_mut().submit());
            }

            DesktopEvent::Scroll { offset } => {
                session.ui_mut().handle_scroll(offset);
                response.ui = Some(*session.ui());
            }
            DesktopEvent::KeyDown { key } => {
                session.ui_mut().key_down(&key);
                response.ui = Some(*session.ui());
            }
            DesktopEvent::MouseDown => {
                session.ui_mut().mouse_down();
                response.ui = Some(*session.ui());
            }
            DesktopEvent::ToggleMobileMenu => {
                session.ui_mut().toggle_mobile_menu();
                response.ui = Some(*session.ui());
            }
            DesktopEvent::FollowNavLink => {
                session.ui_mut().follow_nav_link();
                response.ui = Some(*session.ui());
            }
            DesktopEvent::Snapshot => {
                response.snapshot = Some(build_snapshot(session));
            }
        }

        response.icon_changes = self.session.take_icon_signals();
        Ok(response)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        build_snapshot(&self.session)
    }
}

fn build_snapshot(session: &DesktopSession) -> DesktopSnapshot {
    let shell = session.shell();
    DesktopSnapshot {
        session_id: session.id(),
        started_at: session.started_at(),
        active_window: session.windows().active_window().cloned(),
        windows: session.windows().windows().cloned().collect(),
        terminal: TerminalView {
            prompt: shell.prompt(),
            prompt_text: shell.prompt_text(),
            input_buffer: shell.session().input_buffer().to_string(),
            history_cursor: shell.session().history_cursor(),
            history: shell.session().history().to_vec(),
            transcript: shell.session().transcript().to_vec(),
        },
        effects: session.effects().snapshot(),
        ui: *session.ui(),
        menu: session.menu().items().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn handler() -> DesktopHandler {
        DesktopHandler::new(&Config::from_vars(&HashMap::new()).unwrap())
    }

    #[test]
    fn bad_json_becomes_error_response() {
        let mut h = handler();
        let response = h.handle_line("{not json");
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().code, "invalid_json");
    }

    #[test]
    fn invalid_history_step_is_rejected() {
        let mut h = handler();
        let response = h.handle_line(r#"{"action":"terminal_history","step":2}"#);
        assert_eq!(response.error.unwrap().code, "invalid_event");
    }

    #[test]
    fn unknown_window_is_silently_ok() {
        let mut h = handler();
        let response = h.handle_line(r#"{"action":"show_window","window":"ghost"}"#);
        assert!(response.ok);
        assert!(response.icon_changes.is_empty());
    }
}
