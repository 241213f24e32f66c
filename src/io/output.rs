use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::DocumentFormat;

/// Where submitted values go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// A file; its extension picks the format when it names a known one.
    File(PathBuf),
}

impl OutputTarget {
    /// `-` means stdout, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(raw))
        }
    }

    fn format(&self, fallback: DocumentFormat) -> DocumentFormat {
        match self {
            OutputTarget::Stdout => fallback,
            OutputTarget::File(path) => DocumentFormat::from_path(path).unwrap_or(fallback),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub targets: Vec<OutputTarget>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            targets: vec![OutputTarget::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = OutputTarget>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Write submitted `name → value` pairs to every configured target.
pub fn emit(values: &Map<String, Value>, options: &OutputOptions) -> Result<()> {
    for target in &options.targets {
        let format = target.format(options.format);
        let payload = render(values, format, options.pretty)?;
        match target {
            OutputTarget::Stdout => write_stdout(&payload).context("failed to write to stdout")?,
            OutputTarget::File(path) => write_file(path, &payload)
                .with_context(|| format!("failed to write to file {}", path.display()))?,
        }
        tracing::info!(?target, %format, "emitted submitted values");
    }
    Ok(())
}

/// Serialize submitted values in one format.
pub fn render(values: &Map<String, Value>, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json if pretty => {
            serde_json::to_string_pretty(values).context("failed to serialize JSON")
        }
        DocumentFormat::Json => serde_json::to_string(values).context("failed to serialize JSON"),
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(values).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml if pretty => {
            toml::to_string_pretty(values).context("failed to serialize TOML")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::to_string(values).context("failed to serialize TOML"),
    }
}

fn write_stdout(payload: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", payload.trim_end())?;
    stdout.flush()
}

fn write_file(path: &Path, payload: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", payload.trim_end()))
}
