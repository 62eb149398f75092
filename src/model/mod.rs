//! Model collaborator subsystem.
//!
//! # Data Flow
//! ```text
//! --model <name>
//!     → demo.rs (resolve built-in model)
//!     → Model (immutable name → method map)
//!     → http server (one route per method)
//!
//! Per request:
//!     wire payload
//!     → codec.rs decode (binary or JSON mode)
//!     → method.rs invoke (typed in → typed out)
//!     → codec.rs encode
//!     → wire payload
//! ```
//!
//! # Design Decisions
//! - The method map is built once before the server binds and never mutated
//! - Methods are type-erased behind `BoundMethod` so the dispatch layer is
//!   payload-format agnostic
//! - A model that fails to resolve is fatal before any route exists

pub mod codec;
pub mod demo;
pub mod method;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::method::{BoundMethod, InvokeError, Schema, TypedMethod};

pub use codec::{CodecError, CodecMode};
pub use method::MethodError;

/// Error type for model resolution.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown model {0:?}")]
    Unknown(String),
}

/// A loaded model: an immutable collection of named methods.
pub struct Model {
    name: String,
    methods: BTreeMap<String, Arc<dyn BoundMethod>>,
}

// The erased methods carry no useful state; show the map by name.
impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&Arc<dyn BoundMethod>> {
        self.methods.get(name)
    }

    /// Iterate methods in name order.
    pub fn methods(&self) -> impl Iterator<Item = (&str, &Arc<dyn BoundMethod>)> {
        self.methods.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

/// Builder collecting methods before the map is frozen.
pub struct ModelBuilder {
    name: String,
    methods: BTreeMap<String, Arc<dyn BoundMethod>>,
}

impl ModelBuilder {
    /// Register a typed method under `name`. Registering the same name twice
    /// replaces the earlier entry, keeping one route per name.
    pub fn method<I, O, F>(mut self, name: &str, func: F) -> Self
    where
        I: Schema,
        O: Schema,
        F: Fn(I) -> Result<O, InvokeError> + Send + Sync + 'static,
    {
        self.methods
            .insert(name.to_string(), Arc::new(TypedMethod::new(name, func)));
        self
    }

    pub fn build(self) -> Model {
        Model {
            name: self.name,
            methods: self.methods,
        }
    }
}

pub use demo::load;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Unit {
        n: u32,
    }
    impl Schema for Unit {
        const FIELDS: &'static [&'static str] = &["n"];
    }

    #[test]
    fn test_one_entry_per_method_name() {
        let model = Model::builder("m")
            .method("step", |u: Unit| Ok(Unit { n: u.n + 1 }))
            .method("step", |u: Unit| Ok(Unit { n: u.n + 2 }))
            .build();
        assert_eq!(model.method_count(), 1);
    }

    #[test]
    fn test_methods_iterate_in_name_order() {
        let model = Model::builder("m")
            .method("b", |u: Unit| Ok(u))
            .method("a", |u: Unit| Ok(u))
            .build();
        let names: Vec<&str> = model.methods().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_model_debug_lists_method_names() {
        let model = Model::builder("m")
            .method("step", |u: Unit| Ok(u))
            .build();
        let rendered = format!("{model:?}");
        assert!(rendered.contains("\"m\""), "rendered: {rendered}");
        assert!(rendered.contains("step"), "rendered: {rendered}");
    }

    #[test]
    fn test_method_lookup() {
        let model = Model::builder("m").method("step", |u: Unit| Ok(u)).build();
        assert!(model.method("step").is_some());
        assert!(model.method("missing").is_none());
    }
}
