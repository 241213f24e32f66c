use serde::{Deserialize, Serialize};

use super::{InputVariant, ValidationRule};

/// Which implementation of the popup-bearing variants to use.
///
/// `Native` is the lightweight subset: the select and country code cycle in
/// place and the date field is plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Custom,
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Construction parameters of a single input.
///
/// Mirrors the host-facing options: a present `value` makes the field
/// controlled, `required` prepends the synthetic required rule, and the
/// variant-specific knobs (`options`, `accept`, `min_date`/`max_date`,
/// `country_code`) are ignored by variants that do not use them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    pub variant: InputVariant,
    pub label: String,
    pub name: String,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub validation_rules: Vec<ValidationRule>,
    pub options: Vec<SelectOption>,
    pub accept: Option<String>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub country_code: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub icon: Option<String>,
    pub mode: RenderMode,
}

impl FieldConfig {
    pub fn new(variant: InputVariant, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            variant,
            label: label.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        self.validation_rules.extend(rules);
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn with_min_date(mut self, date: impl Into<String>) -> Self {
        self.min_date = Some(date.into());
        self
    }

    pub fn with_max_date(mut self, date: impl Into<String>) -> Self {
        self.max_date = Some(date.into());
        self
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A titled, ordered list of fields loaded from a form definition document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub title: Option<String>,
    pub fields: Vec<FieldConfig>,
}

impl FormConfig {
    pub fn new(fields: impl IntoIterator<Item = FieldConfig>) -> Self {
        Self {
            title: None,
            fields: fields.into_iter().collect(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }
}
