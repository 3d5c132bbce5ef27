use std::{convert::TryFrom, error, fmt, str};

use serde::Deserialize;

/// Layout of a generated record file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputVariant {
    /// `<App>.Generated<Model>`, metadata attached with a single `SC.mixin` call.
    Mixin,
    /// `<App>.Generated<Model>`, one assignment statement per meta option.
    Assign,
    /// `<App>._<Model>`, one assignment statement per meta option.
    Private,
}

impl OutputVariant {
    pub const ALL: [OutputVariant; 3] = [Self::Mixin, Self::Assign, Self::Private];

    /// Identifier the generated record is bound to.
    pub fn record_ident(self, app_label: &str, model_name: &str) -> String {
        match self {
            Self::Mixin | Self::Assign => format!("{}.Generated{}", app_label, model_name),
            Self::Private => format!("{}._{}", app_label, model_name),
        }
    }

    pub fn uses_mixin(self) -> bool {
        matches!(self, Self::Mixin)
    }
}

impl Default for OutputVariant {
    fn default() -> Self {
        Self::Mixin
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputVariantFromStrError(pub String);

impl fmt::Display for OutputVariantFromStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported output variant '{}', expected one of mixin, assign, private",
            self.0
        )
    }
}

impl error::Error for OutputVariantFromStrError {}

impl str::FromStr for OutputVariant {
    type Err = OutputVariantFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let variant = match s.trim().to_ascii_lowercase().as_str() {
            "a" | "mixin" => Self::Mixin,
            "b" | "assign" => Self::Assign,
            "c" | "private" => Self::Private,
            _ => return Err(OutputVariantFromStrError(s.to_string())),
        };
        Ok(variant)
    }
}

impl TryFrom<String> for OutputVariant {
    type Error = OutputVariantFromStrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for OutputVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mixin => write!(f, "mixin"),
            Self::Assign => write!(f, "assign"),
            Self::Private => write!(f, "private"),
        }
    }
}
