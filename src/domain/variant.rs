use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// The seven input presentations a field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    #[default]
    Text,
    Phone,
    Date,
    File,
    Address,
    Select,
    Currency,
}

impl InputVariant {
    pub const ALL: [InputVariant; 7] = [
        InputVariant::Text,
        InputVariant::Phone,
        InputVariant::Date,
        InputVariant::File,
        InputVariant::Address,
        InputVariant::Select,
        InputVariant::Currency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputVariant::Text => "text",
            InputVariant::Phone => "phone",
            InputVariant::Date => "date",
            InputVariant::File => "file",
            InputVariant::Address => "address",
            InputVariant::Select => "select",
            InputVariant::Currency => "currency",
        }
    }

    /// Variants that own a popup in the custom render mode.
    pub fn has_popup(self) -> bool {
        matches!(
            self,
            InputVariant::Phone | InputVariant::Date | InputVariant::Select
        )
    }
}

impl fmt::Display for InputVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputVariant {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        InputVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == raw)
            .ok_or_else(|| ConfigError::UnknownVariant(raw.to_string()))
    }
}
