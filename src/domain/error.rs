use thiserror::Error;

/// Problems detected while building fields or rules from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown input variant '{0}'")]
    UnknownVariant(String),
    #[error("unknown validation rule type '{0}'")]
    UnknownRule(String),
    #[error("rule '{rule}' requires a value")]
    MissingPayload { rule: &'static str },
    #[error("rule '{rule}' has an invalid value: {reason}")]
    InvalidPayload { rule: &'static str, reason: String },
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid date '{0}', expected yyyy/mm/dd or yyyy-mm-dd")]
    InvalidDate(String),
}
