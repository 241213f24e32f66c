pub mod format;
pub mod input;
pub mod output;

pub use format::DocumentFormat;
pub use input::{load_form, parse_form_str};
pub use output::{OutputOptions, OutputTarget, emit, render};
