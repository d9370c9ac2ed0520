//! Translation errors
//!
//! Fatal conditions abort the translation of one data set. Everything that
//! the legacy layout can absorb (missing optional fields, oversized numbers,
//! failed coefficient arithmetic) is logged instead and never reaches here.

use thiserror::Error;

/// Translation result type
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Fatal translation errors
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("soil profile '{0}' not found in soil source")]
    SoilLookupFailure(String),

    #[error("unsupported crop code '{0}'")]
    UnsupportedCrop(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("soil source error: {0}")]
    SoilSource(#[from] polars::error::PolarsError),
}

impl From<serde_json::Error> for TranslateError {
    fn from(err: serde_json::Error) -> Self {
        TranslateError::MalformedRecord(err.to_string())
    }
}

/// Failure to apply a parameter modifier to one coefficient.
///
/// The coefficient keeps its unmodified value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModifierError {
    #[error("coefficient '{key}' value '{value}' is not numeric")]
    NonNumericValue { key: String, value: String },

    #[error("modifier '{modifier}' value '{value}' is not numeric")]
    NonNumericModifier { modifier: String, value: String },
}
