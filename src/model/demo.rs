//! Built-in demo models.
//!
//! The runner wraps whatever model it is given; these compiled-in models are
//! what `--model` resolves against. Each one is a small deterministic
//! function so end-to-end behavior is easy to verify.

use serde::{Deserialize, Serialize};

use crate::model::method::{InvokeError, Schema};
use crate::model::{Model, ModelError};

/// Input for `doubler/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictRequest {
    pub x: f64,
}

impl Schema for PredictRequest {
    const FIELDS: &'static [&'static str] = &["x"];
}

/// Output for `doubler/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictResponse {
    pub y: f64,
}

impl Schema for PredictResponse {
    const FIELDS: &'static [&'static str] = &["y"];
}

/// Input for `doubler/classify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifyRequest {
    pub value: f64,
}

impl Schema for ClassifyRequest {
    const FIELDS: &'static [&'static str] = &["value"];
}

/// Output for `doubler/classify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifyResponse {
    pub label: String,
}

impl Schema for ClassifyResponse {
    const FIELDS: &'static [&'static str] = &["label"];
}

/// Message for `echo/echo`, used on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EchoMessage {
    pub text: String,
}

impl Schema for EchoMessage {
    const FIELDS: &'static [&'static str] = &["text"];
}

/// Resolve a built-in model by name.
pub fn load(name: &str) -> Result<Model, ModelError> {
    match name {
        "doubler" => Ok(doubler()),
        "echo" => Ok(echo()),
        other => Err(ModelError::Unknown(other.to_string())),
    }
}

/// `predict`: y = 2x. `classify`: sign of the value.
fn doubler() -> Model {
    Model::builder("doubler")
        .method("predict", |input: PredictRequest| {
            Ok(PredictResponse { y: input.x * 2.0 })
        })
        .method("classify", |input: ClassifyRequest| {
            if input.value.is_nan() {
                return Err(InvokeError("cannot classify NaN".into()));
            }
            let label = if input.value < 0.0 {
                "negative"
            } else {
                "positive"
            };
            Ok(ClassifyResponse {
                label: label.to_string(),
            })
        })
        .build()
}

fn echo() -> Model {
    Model::builder("echo")
        .method("echo", |input: EchoMessage| Ok(input))
        .build()
}
