#![deny(rust_2018_idioms)]
//! Polymorphic form inputs for terminal UIs.
//!
//! One [`InputField`] drives any of seven variants (text, phone, date, file,
//! address, select, currency). It owns the value, the touched flag and the
//! visual state, and it validates through [`validate`] on blur and, once
//! touched, on every change. [`FormState`] stacks fields. [`FormUI`] runs
//! them in a terminal.

pub mod app;
pub mod domain;
pub mod form;
pub mod io;
pub mod presentation;
pub mod validation;

pub use app::{FormUI, UiOptions};
pub use domain::{
    ChecklistItem, ConfigError, FieldConfig, FormConfig, InputVariant, RenderMode, RuleKind,
    SelectOption, Severity, ValidationMessage, ValidationResult, ValidationRule, VisualState,
};
pub use form::{FieldEvent, FormState, InputField, PointerListeners, PopupHit, SubmitError};
pub use presentation::FieldView;
pub use validation::{validate, validate_checklist};

pub mod prelude {
    pub use super::{
        FieldConfig, FormConfig, FormState, FormUI, InputField, InputVariant, Severity,
        UiOptions, ValidationRule, VisualState, validate,
    };
}
