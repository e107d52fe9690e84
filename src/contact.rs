use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use tracing::{info, instrument};

const SUCCESS_MESSAGE: &str = "Message sent successfully!";
const ERROR_MESSAGE: &str = "Please fill in all fields!";
/// How long the UI should keep a banner on screen.
pub const BANNER_DISMISS_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ];
}

impl FromStr for ContactField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(ContactField::Name),
            "email" => Ok(ContactField::Email),
            "subject" => Ok(ContactField::Subject),
            "message" => Ok(ContactField::Message),
            _ => Err(AppError::UnknownFormField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub dismiss_after_ms: u64,
}

/// Contact form state. Submission is simulated; nothing leaves the process.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: BTreeMap<ContactField, String>,
    focused: BTreeSet<ContactField>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: ContactField, value: &str) {
        self.values.insert(field, value.to_string());
    }

    pub fn value(&self, field: ContactField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn focus(&mut self, field: ContactField) {
        self.focused.insert(field);
    }

    /// A field keeps its focused styling after blur only while it has a value.
    pub fn blur(&mut self, field: ContactField) {
        if self.value(field).is_empty() {
            self.focused.remove(&field);
        }
    }

    pub fn is_focused(&self, field: ContactField) -> bool {
        self.focused.contains(&field)
    }

    pub fn is_valid(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|f| !self.value(*f).trim().is_empty())
    }

    #[instrument(skip(self))]
    pub fn submit(&mut self) -> Banner {
        if self.is_valid() {
            info!(email = %self.value(ContactField::Email), "Contact form submitted");
            self.values.clear();
            self.focused.clear();
            Banner {
                kind: BannerKind::Success,
                message: SUCCESS_MESSAGE.to_string(),
                dismiss_after_ms: BANNER_DISMISS_MS,
            }
        } else {
            Banner {
                kind: BannerKind::Error,
                message: ERROR_MESSAGE.to_string(),
                dismiss_after_ms: BANNER_DISMISS_MS,
            }
        }
    }
}
