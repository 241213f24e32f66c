use serde::Serialize;

use super::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub text: String,
    pub severity: Severity,
}

/// Outcome of one validation run.
///
/// `messages` keeps rule order; hosts usually surface only the first one but
/// every message is reported to the validation callback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub state: Option<Severity>,
    pub messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    pub(crate) fn from_messages(messages: Vec<ValidationMessage>) -> Self {
        let has_error = messages
            .iter()
            .any(|message| message.severity == Severity::Error);
        let has_warning = messages
            .iter()
            .any(|message| message.severity == Severity::Warning);
        let state = if has_error {
            Some(Severity::Error)
        } else if has_warning {
            Some(Severity::Warning)
        } else {
            None
        };
        Self {
            valid: !has_error,
            state,
            messages,
        }
    }

    pub fn first_message(&self) -> Option<&ValidationMessage> {
        self.messages.first()
    }
}

/// One row of a progressive checklist ("✓ Minimum 16 characters").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub text: String,
    pub passed: bool,
}
