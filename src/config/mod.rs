//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI flag overrides (port, codec mode, echo)
//!     → runtime.json (downstream URL list, permissive)
//!     → RunnerConfig (immutable)
//!     → shared via Arc-held state with all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the dispatch table is built; no runtime reload
//! - All fields have defaults so the runner starts with no config at all
//! - The runtime.json artifact is permissive: missing or unreadable means an
//!   empty downstream list, never a startup failure

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_downstream, ConfigError};
pub use schema::{
    CodecConfig, DownstreamConfig, ListenerConfig, ObservabilityConfig, RunnerConfig,
    TimeoutConfig,
};
