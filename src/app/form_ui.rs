use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::domain::FormConfig;
use crate::form::FormState;
use crate::io::{OutputOptions, emit};

use super::{options::UiOptions, runtime::App};

/// Interactive terminal form: collects input until submitted or abandoned.
#[derive(Debug)]
pub struct FormUI {
    config: FormConfig,
    options: UiOptions,
    output: Option<OutputOptions>,
}

impl FormUI {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            options: UiOptions::default(),
            output: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Also write the submitted values once the terminal is restored.
    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = Some(output);
        self
    }

    /// Run until the form is submitted; returns `name → value`.
    pub fn run(self) -> Result<Map<String, Value>> {
        let FormUI {
            config,
            options,
            output,
        } = self;

        let form_state = FormState::from_config(config).context("invalid form definition")?;
        tracing::info!(fields = form_state.len(), "starting form session");
        let values = App::new(form_state, options).run()?;

        if let Some(output) = output {
            emit(&values, &output)?;
        }
        Ok(values)
    }
}
