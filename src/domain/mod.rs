mod config;
mod error;
mod result;
mod rule;
mod state;
mod variant;

pub use config::{FieldConfig, FormConfig, RenderMode, SelectOption};
pub use error::ConfigError;
pub use result::{ChecklistItem, ValidationMessage, ValidationResult};
pub use rule::{RuleKind, ValidationRule};
pub(crate) use rule::normalize_extension;
pub use state::{Severity, VisualState};
pub use variant::InputVariant;
