//! Rule evaluation for field values.
//!
//! [`validate`] is pure: the same value, variant and rules always produce the
//! same [`ValidationResult`]. Malformed numbers never make `min`/`max` fire,
//! while a value that does not match a pattern always does. `fileSize` and
//! `custom` rules are carried through untouched for the host to enforce.

mod builtin;

use regex::Regex;

use crate::domain::{
    ChecklistItem, InputVariant, RuleKind, ValidationMessage, ValidationResult, ValidationRule,
};

pub use builtin::{
    ADDRESS_MIN_LENGTH, CURRENCY_PATTERN, DATE_PATTERN, PHONE_PATTERN, REQUIRED_MESSAGE,
    builtin_rules, default_pattern, required_rule,
};

/// Evaluate the variant's built-in rules followed by `custom_rules`.
///
/// Any `required` rule is moved to the front so its message always leads.
pub fn validate(
    value: &str,
    variant: InputVariant,
    custom_rules: &[ValidationRule],
) -> ValidationResult {
    let fallback = default_pattern(variant);
    let builtin = builtin_rules(variant);
    let (required, rest): (Vec<&ValidationRule>, Vec<&ValidationRule>) = builtin
        .iter()
        .chain(custom_rules.iter())
        .partition(|rule| matches!(rule.kind, RuleKind::Required));

    let messages = required
        .into_iter()
        .chain(rest)
        .filter(|rule| rule_fires(rule, value, fallback))
        .map(|rule| ValidationMessage {
            text: rule.message.clone(),
            severity: rule.severity,
        })
        .collect::<Vec<_>>();

    let result = ValidationResult::from_messages(messages);
    tracing::debug!(
        %variant,
        valid = result.valid,
        messages = result.messages.len(),
        "validated field value"
    );
    result
}

/// Pass/fail for every rule, in order, for progressive checklist UIs.
pub fn validate_checklist(value: &str, rules: &[ValidationRule]) -> Vec<ChecklistItem> {
    rules
        .iter()
        .map(|rule| ChecklistItem {
            text: rule.message.clone(),
            passed: !rule_fires(rule, value, None),
        })
        .collect()
}

/// Build the caller-side rule list: the synthetic required rule (when set)
/// followed by the configured rules.
pub fn field_rules(required: bool, rules: &[ValidationRule]) -> Vec<ValidationRule> {
    let mut all = Vec::with_capacity(rules.len() + usize::from(required));
    if required {
        all.push(required_rule());
    }
    all.extend(rules.iter().cloned());
    all
}

fn rule_fires(rule: &ValidationRule, value: &str, fallback: Option<&Regex>) -> bool {
    match &rule.kind {
        RuleKind::Required => value.trim().is_empty(),
        RuleKind::MinLength(min) => value.chars().count() < *min,
        RuleKind::MaxLength(max) => value.chars().count() > *max,
        RuleKind::Pattern(pattern) => match pattern.as_ref().or(fallback) {
            Some(regex) => !value.is_empty() && !regex.is_match(value),
            None => false,
        },
        RuleKind::Min(min) => parse_number(value).is_some_and(|number| number < *min),
        RuleKind::Max(max) => parse_number(value).is_some_and(|number| number > *max),
        RuleKind::FileType(allowed) => {
            if value.is_empty() {
                return false;
            }
            let extension = value.rsplit('.').next().unwrap_or_default().to_lowercase();
            !allowed.iter().any(|ext| *ext == extension)
        }
        // Enforced by the host; nothing to check against a bare value.
        RuleKind::FileSize(_) | RuleKind::Custom(_) => false,
    }
}

fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|number| !number.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    fn texts(result: &ValidationResult) -> Vec<&str> {
        result
            .messages
            .iter()
            .map(|message| message.text.as_str())
            .collect()
    }

    #[test]
    fn empty_rule_set_is_valid() {
        let result = validate("anything", InputVariant::Text, &[]);
        assert!(result.valid);
        assert_eq!(result.state, None);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn required_fires_on_whitespace() {
        let rules = field_rules(true, &[]);
        let result = validate("   ", InputVariant::Text, &rules);
        assert!(!result.valid);
        assert_eq!(result.state, Some(Severity::Error));
        assert_eq!(texts(&result), vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn required_message_leads_builtin_messages() {
        let rules = field_rules(true, &[]);
        let result = validate("", InputVariant::Address, &rules);
        assert_eq!(
            texts(&result),
            vec![REQUIRED_MESSAGE, "Minimum 16 characters"]
        );
    }

    #[test]
    fn currency_rejects_five_decimals() {
        let result = validate("12.34567", InputVariant::Currency, &[]);
        assert!(!result.valid);
        assert_eq!(texts(&result), vec!["Enter a valid number"]);
        assert!(validate("-12.3456", InputVariant::Currency, &[]).valid);
        assert!(validate("12.345", InputVariant::Currency, &[]).valid);
    }

    #[test]
    fn empty_values_skip_patterns() {
        for variant in [InputVariant::Phone, InputVariant::Date, InputVariant::Currency] {
            assert!(validate("", variant, &[]).valid, "{variant} should accept empty");
        }
    }

    #[test]
    fn phone_and_date_builtins() {
        assert!(validate("+44 7904 567670", InputVariant::Phone, &[]).valid);
        assert!(!validate("call me", InputVariant::Phone, &[]).valid);
        assert!(validate("2024/02/29", InputVariant::Date, &[]).valid);
        assert!(validate("2024-02-29", InputVariant::Date, &[]).valid);
        assert!(!validate("29/02/2024", InputVariant::Date, &[]).valid);
    }

    #[test]
    fn min_max_fail_open_on_malformed_numbers() {
        let rules = [ValidationRule::min(10.0, "too small"), ValidationRule::max(20.0, "too big")];
        assert!(validate("abc", InputVariant::Text, &rules).valid);
        assert!(validate("", InputVariant::Text, &rules).valid);
        assert_eq!(texts(&validate("5", InputVariant::Text, &rules)), vec!["too small"]);
        assert_eq!(texts(&validate(" 25 ", InputVariant::Text, &rules)), vec!["too big"]);
        assert!(validate("15", InputVariant::Text, &rules).valid);
    }

    #[test]
    fn pattern_without_expression_uses_variant_default() {
        let rules = [ValidationRule::new(RuleKind::Pattern(None), "custom phone message")];
        let result = validate("abc", InputVariant::Phone, &rules);
        assert_eq!(
            texts(&result),
            vec!["Enter a valid phone number", "custom phone message"]
        );
        assert!(validate("abc", InputVariant::Text, &rules).valid);
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let rules = [ValidationRule::max_length(3, "long value").warning()];
        let result = validate("abcdef", InputVariant::Text, &rules);
        assert!(result.valid);
        assert_eq!(result.state, Some(Severity::Warning));
        assert_eq!(result.messages[0].severity, Severity::Warning);
    }

    #[test]
    fn error_outranks_warning() {
        let rules = [
            ValidationRule::max_length(3, "long value").warning(),
            ValidationRule::min_length(10, "short value"),
        ];
        let result = validate("abcdef", InputVariant::Text, &rules);
        assert!(!result.valid);
        assert_eq!(result.state, Some(Severity::Error));
        assert_eq!(texts(&result), vec!["long value", "short value"]);
    }

    #[test]
    fn file_type_checks_extension() {
        let rules = [ValidationRule::file_type(["pdf", ".PNG"], "Unsupported file")];
        assert!(validate("", InputVariant::File, &rules).valid);
        assert!(validate("scan.PNG", InputVariant::File, &rules).valid);
        assert!(validate("report.final.pdf", InputVariant::File, &rules).valid);
        assert!(!validate("notes.txt", InputVariant::File, &rules).valid);
        assert!(!validate("README", InputVariant::File, &rules).valid);
    }

    #[test]
    fn file_size_and_custom_never_fire() {
        let rules = [
            ValidationRule::new(RuleKind::FileSize(Some(1)), "too large"),
            ValidationRule::new(RuleKind::Custom(Some("server".into())), "taken"),
        ];
        assert!(validate("huge.bin", InputVariant::File, &rules).messages.is_empty());
    }

    #[test]
    fn validation_is_idempotent() {
        let rules = field_rules(true, &[ValidationRule::min_length(3, "short")]);
        let first = validate("ab", InputVariant::Text, &rules);
        let second = validate("ab", InputVariant::Text, &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn checklist_reports_every_rule() {
        let rules = [
            ValidationRule::min_length(8, "At least 8 characters"),
            ValidationRule::pattern("[0-9]", "Contains a digit").unwrap(),
            ValidationRule::required("Not empty"),
        ];
        let items = validate_checklist("abc1", &rules);
        let passed = items.iter().map(|item| item.passed).collect::<Vec<_>>();
        assert_eq!(passed, vec![false, true, true]);
        assert_eq!(items[0].text, "At least 8 characters");
    }
}
