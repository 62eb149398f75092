//! Wire payload translation.
//!
//! # Responsibilities
//! - Decode an inbound payload into a typed message
//! - Encode a typed output message back into a wire payload
//! - Classify decode failures so handlers can answer with useful diagnostics
//!
//! # Design Decisions
//! - One codec mode for the whole process, chosen at startup
//! - JSON decode runs in two steps (syntax, then schema) so that a payload
//!   that is valid JSON but does not fit the input schema is reported with
//!   the schema's field names instead of a generic value error
//! - Empty payloads are rejected up front in both modes

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::method::Schema;

/// Process-wide wire representation for method inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecMode {
    /// Native binary encoding of the typed message.
    Binary,
    /// JSON projection of the typed message.
    Json,
}

impl Default for CodecMode {
    fn default() -> Self {
        CodecMode::Binary
    }
}

impl std::fmt::Display for CodecMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecMode::Binary => write!(f, "binary"),
            CodecMode::Json => write!(f, "json"),
        }
    }
}

/// Error type for payload translation.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload was syntactically valid JSON but did not map onto the
    /// input schema. Carries the schema's field names for diagnosis.
    #[error("value specification error, expected {expected:?}: {reason}")]
    SchemaParse {
        expected: &'static [&'static str],
        reason: String,
    },

    /// Any other decode or encode failure: malformed bytes, invalid JSON
    /// syntax, wrong value types, empty payload.
    #[error("value conversion error: {reason}")]
    Conversion { reason: String },
}

impl CodecError {
    fn conversion(reason: impl std::fmt::Display) -> Self {
        CodecError::Conversion {
            reason: reason.to_string(),
        }
    }
}

/// Decode a wire payload into a typed message.
pub fn decode<T: Schema + DeserializeOwned>(
    mode: CodecMode,
    payload: &[u8],
) -> Result<T, CodecError> {
    if payload.is_empty() {
        return Err(CodecError::conversion("empty payload"));
    }
    match mode {
        CodecMode::Binary => bincode::deserialize(payload).map_err(CodecError::conversion),
        CodecMode::Json => {
            // Syntax first: invalid JSON is a plain conversion error.
            let value: serde_json::Value =
                serde_json::from_slice(payload).map_err(CodecError::conversion)?;
            serde_json::from_value(value).map_err(|e| CodecError::SchemaParse {
                expected: T::FIELDS,
                reason: e.to_string(),
            })
        }
    }
}

/// Encode a typed output message into a wire payload.
pub fn encode<T: Schema + Serialize>(mode: CodecMode, message: &T) -> Result<Vec<u8>, CodecError> {
    match mode {
        CodecMode::Binary => bincode::serialize(message).map_err(CodecError::conversion),
        CodecMode::Json => serde_json::to_vec(message).map_err(CodecError::conversion),
    }
}
