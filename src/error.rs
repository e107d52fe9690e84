use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] anyhow::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    // Never surfaced to the user; the window manager turns it into a no-op.
    #[error("Unknown window: {0}")]
    UnknownWindow(String),

    #[error("Unknown context menu item: {0}")]
    UnknownMenuItem(String),

    #[error("Unknown contact form field: {0}")]
    UnknownFormField(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

impl AppError {
    /// Short machine-readable code used in JSON error responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StdIoError(_) => "io",
            AppError::ConfigError(_) => "config",
            AppError::SerdeJsonError(_) => "invalid_json",
            AppError::UnknownWindow(_) => "unknown_window",
            AppError::UnknownMenuItem(_) => "unknown_menu_item",
            AppError::UnknownFormField(_) => "unknown_form_field",
            AppError::InvalidEvent(_) => "invalid_event",
        }
    }
}
