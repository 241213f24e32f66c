use std::fmt;

use serde::{Deserialize, Serialize};

/// Display/interaction mode of a field. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    #[default]
    Default,
    Active,
    Error,
    Warning,
    Idle,
    Disabled,
}

impl VisualState {
    /// Value of the `data-state` hook exposed to hosts.
    pub fn as_attr(self) -> &'static str {
        match self {
            VisualState::Default => "default",
            VisualState::Active => "active",
            VisualState::Error => "error",
            VisualState::Warning => "warning",
            VisualState::Idle => "idle",
            VisualState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

impl From<Severity> for VisualState {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => VisualState::Error,
            Severity::Warning => VisualState::Warning,
        }
    }
}

/// Severity attached to a rule and to every message it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    pub fn as_attr(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}
