use std::fmt;

use scgen::variant::OutputVariantFromStrError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("malformed descriptor: {kind} '{name}' is not a valid identifier")]
    MalformedDescriptor { kind: &'static str, name: String },
    #[error("unsupported output variant '{0}'")]
    UnsupportedVariant(String),
    #[error("format error: {0}")]
    Fmt(#[from] fmt::Error),
}

impl From<OutputVariantFromStrError> for Error {
    fn from(err: OutputVariantFromStrError) -> Self {
        Error::UnsupportedVariant(err.0)
    }
}
