use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{InputVariant, RuleKind, ValidationRule};

pub const PHONE_PATTERN: &str = r"^\+?[0-9\s()-]{7,20}$";
pub const DATE_PATTERN: &str = r"^[0-9]{4}[/-][0-9]{2}[/-][0-9]{2}$";
pub const CURRENCY_PATTERN: &str = r"^-?[0-9]+(\.[0-9]{1,4})?$";
pub const ADDRESS_MIN_LENGTH: usize = 16;

pub const REQUIRED_MESSAGE: &str = "This field is required";

struct BuiltinTable {
    phone: Vec<ValidationRule>,
    date: Vec<ValidationRule>,
    address: Vec<ValidationRule>,
    currency: Vec<ValidationRule>,
}

fn fixed_pattern(pattern: &str, message: &str) -> ValidationRule {
    let regex = Regex::new(pattern).expect("built-in pattern must compile");
    ValidationRule::new(RuleKind::Pattern(Some(regex)), message)
}

static BUILTINS: LazyLock<BuiltinTable> = LazyLock::new(|| BuiltinTable {
    phone: vec![fixed_pattern(PHONE_PATTERN, "Enter a valid phone number")],
    date: vec![fixed_pattern(DATE_PATTERN, "Enter a valid date (yyyy/mm/dd)")],
    address: vec![ValidationRule::min_length(
        ADDRESS_MIN_LENGTH,
        format!("Minimum {ADDRESS_MIN_LENGTH} characters"),
    )],
    currency: vec![fixed_pattern(CURRENCY_PATTERN, "Enter a valid number")],
});

/// Rules attached to every field of `variant`, ahead of caller rules.
pub fn builtin_rules(variant: InputVariant) -> &'static [ValidationRule] {
    let table = &*BUILTINS;
    match variant {
        InputVariant::Phone => &table.phone,
        InputVariant::Date => &table.date,
        InputVariant::Address => &table.address,
        InputVariant::Currency => &table.currency,
        InputVariant::Text | InputVariant::File | InputVariant::Select => &[],
    }
}

/// Pattern used by a `pattern` rule that carries no expression of its own.
pub fn default_pattern(variant: InputVariant) -> Option<&'static Regex> {
    builtin_rules(variant).iter().find_map(|rule| match &rule.kind {
        RuleKind::Pattern(Some(regex)) => Some(regex),
        _ => None,
    })
}

/// The rule prepended when a field is marked required.
pub fn required_rule() -> ValidationRule {
    ValidationRule::required(REQUIRED_MESSAGE)
}
