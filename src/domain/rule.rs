use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{ConfigError, Severity};

/// Predicate carried by a [`ValidationRule`].
///
/// `FileSize` and `Custom` are accepted and reported but never fire inside the
/// engine; the host is expected to enforce them.
#[derive(Debug, Clone)]
pub enum RuleKind {
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// `None` falls back to the variant's built-in pattern.
    Pattern(Option<Regex>),
    Min(f64),
    Max(f64),
    /// Lower-cased extensions without the leading dot.
    FileType(Vec<String>),
    FileSize(Option<u64>),
    Custom(Option<String>),
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::MinLength(_) => "minLength",
            RuleKind::MaxLength(_) => "maxLength",
            RuleKind::Pattern(_) => "pattern",
            RuleKind::Min(_) => "min",
            RuleKind::Max(_) => "max",
            RuleKind::FileType(_) => "fileType",
            RuleKind::FileSize(_) => "fileSize",
            RuleKind::Custom(_) => "custom",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct ValidationRule {
    pub kind: RuleKind,
    pub message: String,
    pub severity: Severity,
}

impl ValidationRule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Required, message)
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MinLength(min), message)
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MaxLength(max), message)
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, ConfigError> {
        let regex = compile_pattern(pattern)?;
        Ok(Self::new(RuleKind::Pattern(Some(regex)), message))
    }

    pub fn min(min: f64, message: impl Into<String>) -> Self {
        Self::new(RuleKind::Min(min), message)
    }

    pub fn max(max: f64, message: impl Into<String>) -> Self {
        Self::new(RuleKind::Max(max), message)
    }

    pub fn file_type<I, S>(extensions: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        Self::new(RuleKind::FileType(extensions), message)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn warning(self) -> Self {
        self.with_severity(Severity::Warning)
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

pub(crate) fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_lowercase()
}

#[derive(Deserialize)]
struct RawRule {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: Option<Value>,
    message: String,
    #[serde(default)]
    severity: Option<Severity>,
}

impl TryFrom<RawRule> for ValidationRule {
    type Error = ConfigError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let value = raw.value.as_ref();
        let kind = match raw.kind.as_str() {
            "required" => RuleKind::Required,
            "minLength" => RuleKind::MinLength(length_payload("minLength", value)?),
            "maxLength" => RuleKind::MaxLength(length_payload("maxLength", value)?),
            "pattern" => match value {
                None | Some(Value::Null) => RuleKind::Pattern(None),
                Some(Value::String(pattern)) => RuleKind::Pattern(Some(compile_pattern(pattern)?)),
                Some(other) => return Err(invalid("pattern", other)),
            },
            "min" => RuleKind::Min(number_payload("min", value)?),
            "max" => RuleKind::Max(number_payload("max", value)?),
            "fileType" => RuleKind::FileType(extensions_payload(value)?),
            "fileSize" => RuleKind::FileSize(value.and_then(Value::as_u64)),
            "custom" => RuleKind::Custom(value.and_then(Value::as_str).map(str::to_string)),
            other => return Err(ConfigError::UnknownRule(other.to_string())),
        };
        Ok(Self {
            kind,
            message: raw.message,
            severity: raw.severity.unwrap_or_default(),
        })
    }
}

fn length_payload(rule: &'static str, value: Option<&Value>) -> Result<usize, ConfigError> {
    let value = value.ok_or(ConfigError::MissingPayload { rule })?;
    value
        .as_u64()
        .and_then(|len| usize::try_from(len).ok())
        .ok_or_else(|| invalid(rule, value))
}

fn number_payload(rule: &'static str, value: Option<&Value>) -> Result<f64, ConfigError> {
    let value = value.ok_or(ConfigError::MissingPayload { rule })?;
    value.as_f64().ok_or_else(|| invalid(rule, value))
}

fn extensions_payload(value: Option<&Value>) -> Result<Vec<String>, ConfigError> {
    let rule = "fileType";
    match value {
        None => Err(ConfigError::MissingPayload { rule }),
        Some(Value::String(list)) => Ok(list
            .split(',')
            .map(normalize_extension)
            .filter(|ext| !ext.is_empty())
            .collect()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(normalize_extension)
                    .ok_or_else(|| invalid(rule, item))
            })
            .collect(),
        Some(other) => Err(invalid(rule, other)),
    }
}

fn invalid(rule: &'static str, value: &Value) -> ConfigError {
    ConfigError::InvalidPayload {
        rule,
        reason: format!("unexpected value {value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<ValidationRule, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn parses_length_rule_with_default_severity() {
        let rule = parse(json!({"type": "minLength", "value": 16, "message": "too short"})).unwrap();
        assert!(matches!(rule.kind, RuleKind::MinLength(16)));
        assert_eq!(rule.severity, Severity::Error);
        assert_eq!(rule.message, "too short");
    }

    #[test]
    fn parses_warning_pattern() {
        let rule = parse(json!({
            "type": "pattern",
            "value": "^[a-z]+$",
            "message": "lowercase only",
            "severity": "warning"
        }))
        .unwrap();
        assert_eq!(rule.severity, Severity::Warning);
        match rule.kind {
            RuleKind::Pattern(Some(regex)) => assert!(regex.is_match("abc")),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn pattern_without_value_defers_to_variant() {
        let rule = parse(json!({"type": "pattern", "message": "bad"})).unwrap();
        assert!(matches!(rule.kind, RuleKind::Pattern(None)));
    }

    #[test]
    fn rejects_broken_regex() {
        let err = parse(json!({"type": "pattern", "value": "([a-z", "message": "x"})).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn rejects_unknown_rule_type() {
        let err = parse(json!({"type": "email", "message": "x"})).unwrap_err();
        assert!(err.to_string().contains("unknown validation rule type"));
    }

    #[test]
    fn min_length_requires_payload() {
        let err = parse(json!({"type": "minLength", "message": "x"})).unwrap_err();
        assert!(err.to_string().contains("requires a value"));
    }

    #[test]
    fn file_types_are_normalized() {
        let rule = parse(json!({"type": "fileType", "value": [".PDF", "png"], "message": "x"})).unwrap();
        match rule.kind {
            RuleKind::FileType(exts) => assert_eq!(exts, vec!["pdf", "png"]),
            other => panic!("unexpected kind {other:?}"),
        }
        let rule = parse(json!({"type": "fileType", "value": "jpg, .gif", "message": "x"})).unwrap();
        match rule.kind {
            RuleKind::FileType(exts) => assert_eq!(exts, vec!["jpg", "gif"]),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
