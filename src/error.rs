use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a single scheme document.
///
/// Everything except [`SchemeError::UnparsableColor`] means the document is
/// malformed and the scheme is skipped. An unparsable color only drops the
/// entry from the preview strip.
#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("invalid scheme YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("scheme {path} is missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("scheme {path} has field `{field}` of the wrong type, expected a string")]
    WrongFieldType { path: PathBuf, field: &'static str },

    #[error("scheme {path} has palette key {key} that is not a string or number")]
    InvalidPaletteKey { path: PathBuf, key: String },

    #[error("scheme {path} has a `palette` that is not a mapping")]
    PaletteNotMapping { path: PathBuf },

    #[error("scheme {path} has a non-string value for palette key `{key}`")]
    InvalidColorValue { path: PathBuf, key: String },

    #[error("invalid hex color {value:?}: {reason}")]
    UnparsableColor { value: String, reason: String },
}

impl SchemeError {
    /// Whether this error makes the whole scheme unusable.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::UnparsableColor { .. })
    }
}
