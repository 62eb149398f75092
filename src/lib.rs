//! Model Runner Library
//!
//! Exposes an in-process predictive model as one HTTP route per method.

pub mod config;
pub mod downstream;
pub mod http;
pub mod model;
pub mod observability;

pub use config::RunnerConfig;
pub use http::HttpServer;
pub use model::{CodecMode, Model};
