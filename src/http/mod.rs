//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request on /<method>
//!     → server.rs (dispatch table built at startup)
//!     → extract.rs (raw body > form fields > query params)
//!     → model codec + invocation
//!     → downstream forwarder (side channel)
//!     → 201 with output payload or acknowledgement
//! ```

pub mod extract;
pub mod server;

pub use server::{AppState, HttpServer, ACK_BODY};
