//! Typed model methods and their type-erased binding.
//!
//! # Responsibilities
//! - Define the message contract a method's input/output types satisfy
//! - Run decode → invoke → encode with the concrete types known
//! - Erase the concrete types so the dispatch table can hold any method
//!
//! # Design Decisions
//! - `Schema::FIELDS` is a compile-time field list; it exists only to make
//!   schema-parse diagnostics name what the method expected
//! - The invocation itself is a plain function from input to output; any
//!   failure it reports is opaque to this layer and is not classified

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::codec::{self, CodecError, CodecMode};

/// A message type a method can receive or produce.
///
/// Field names are used only for diagnostics when a JSON payload fails to
/// map onto the schema. Implementors mark themselves
/// `#[serde(deny_unknown_fields)]` so a payload carrying stray keys fails
/// schema matching instead of being silently truncated.
pub trait Schema: Serialize + DeserializeOwned + Send + 'static {
    const FIELDS: &'static [&'static str];
}

/// Failure raised by the model's own logic during invocation.
///
/// The runner does not interpret these; they surface as a generic
/// server-side error.
#[derive(Debug, thiserror::Error)]
#[error("method invocation failed: {0}")]
pub struct InvokeError(pub String);

/// Error type covering a full decode → invoke → encode pass.
#[derive(Debug, thiserror::Error)]
pub enum MethodError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

/// A model method with its concrete input/output types erased.
///
/// The dispatch table holds one of these per route; handlers only ever see
/// wire payloads.
pub trait BoundMethod: Send + Sync {
    /// Method name, used as the route path segment.
    fn name(&self) -> &str;

    /// Field names of the input schema, for diagnostics and route logs.
    fn input_fields(&self) -> &'static [&'static str];

    /// Field names of the output schema, for route logs.
    fn output_fields(&self) -> &'static [&'static str];

    /// Decode the payload, invoke the method, encode the result.
    fn run(&self, mode: CodecMode, payload: &[u8]) -> Result<Vec<u8>, MethodError>;
}

/// A named method over concrete typed messages.
pub struct TypedMethod<I, O> {
    name: String,
    func: Box<dyn Fn(I) -> Result<O, InvokeError> + Send + Sync>,
}

impl<I: Schema, O: Schema> TypedMethod<I, O> {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(I) -> Result<O, InvokeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl<I: Schema, O: Schema> BoundMethod for TypedMethod<I, O> {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_fields(&self) -> &'static [&'static str] {
        I::FIELDS
    }

    fn output_fields(&self) -> &'static [&'static str] {
        O::FIELDS
    }

    fn run(&self, mode: CodecMode, payload: &[u8]) -> Result<Vec<u8>, MethodError> {
        let input: I = codec::decode(mode, payload)?;
        let output = (self.func)(input)?;
        Ok(codec::encode(mode, &output)?)
    }
}
