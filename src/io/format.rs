use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Document formats for form definitions and submitted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl DocumentFormat {
    /// Formats compiled into this build.
    pub fn available() -> &'static [DocumentFormat] {
        &[
            DocumentFormat::Json,
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml,
            #[cfg(feature = "toml")]
            DocumentFormat::Toml,
        ]
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_extension)
    }
}

impl FromStr for DocumentFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match Self::from_extension(value) {
            Some(format) => Ok(format),
            None => bail!(
                "unsupported format '{value}' (available: {})",
                Self::available()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_json_by_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("signup.JSON")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("signup")), None);
    }

    #[test]
    fn rejects_unknown_format_names() {
        let err = "xml".parse::<DocumentFormat>().unwrap_err();
        assert!(err.to_string().contains("unsupported format 'xml'"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn accepts_short_yaml_extension() {
        assert_eq!(DocumentFormat::from_extension("yml"), Some(DocumentFormat::Yaml));
    }
}
