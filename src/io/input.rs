use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::FormConfig;

use super::DocumentFormat;

/// Parse a form definition document.
pub fn parse_form_str(contents: &str, format: DocumentFormat) -> Result<FormConfig> {
    let form = match format {
        DocumentFormat::Json => serde_json::from_str::<FormConfig>(contents)
            .context("failed to parse JSON form definition")?,
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::from_str::<FormConfig>(contents)
            .context("failed to parse YAML form definition")?,
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<FormConfig>(contents)
            .context("failed to parse TOML form definition")?,
    };
    tracing::debug!(%format, fields = form.fields.len(), "parsed form definition");
    Ok(form)
}

/// Read a form definition, picking the format from the file extension
/// (JSON when it is missing or unknown).
pub fn load_form(path: &Path) -> Result<FormConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read form definition {}", path.display()))?;
    let format = DocumentFormat::from_path(path).unwrap_or_default();
    parse_form_str(&contents, format)
        .with_context(|| format!("invalid form definition {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InputVariant, RuleKind, Severity};

    #[test]
    fn parses_json_form_with_rules() {
        let form = parse_form_str(
            r#"{
                "title": "Sign up",
                "fields": [
                    {"variant": "text", "label": "Name", "name": "name", "required": true},
                    {"variant": "currency", "label": "Budget", "name": "budget",
                     "validationRules": [
                        {"type": "max", "value": 500, "message": "Over budget", "severity": "warning"}
                     ]}
                ]
            }"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert_eq!(form.title.as_deref(), Some("Sign up"));
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.fields[1].variant, InputVariant::Currency);
        let rule = &form.fields[1].validation_rules[0];
        assert!(matches!(rule.kind, RuleKind::Max(max) if max == 500.0));
        assert_eq!(rule.severity, Severity::Warning);
    }

    #[test]
    fn reports_bad_rule_payloads() {
        let err = parse_form_str(
            r#"{"fields": [{"label": "A", "name": "a",
                "validationRules": [{"type": "pattern", "value": "(", "message": "x"}]}]}"#,
            DocumentFormat::Json,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse JSON form definition"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parses_toml_form() {
        let form = parse_form_str(
            r#"
            title = "Contact"

            [[fields]]
            variant = "phone"
            label = "Mobile"
            name = "mobile"
            countryCode = "+49"
            "#,
            DocumentFormat::Toml,
        )
        .unwrap();
        assert_eq!(form.fields[0].country_code.as_deref(), Some("+49"));
    }
}
