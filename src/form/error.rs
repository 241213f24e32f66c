use thiserror::Error;

/// Submission was blocked by at least one field with an error-severity message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct SubmitError {
    /// Index of the first invalid field; focus is moved there.
    pub index: usize,
    pub name: String,
    pub message: String,
    /// How many fields failed in total.
    pub invalid: usize,
}
