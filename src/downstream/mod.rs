//! Downstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! encoded output payload
//!     → forwarder.rs (POST to each configured subscriber, in order)
//!     → per-target outcome (logged + counted, never surfaced)
//! ```
//!
//! # Design Decisions
//! - Forwarding happens after a successful encode and before the response
//! - Each subscriber is an independent delivery target; no deduplication
//! - Delivery failures degrade nothing but the operational log

pub mod forwarder;

pub use forwarder::{Delivery, Forwarder};
