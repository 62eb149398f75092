//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and forwarder produce:
//!     → tracing events (structured log records)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod metrics;
