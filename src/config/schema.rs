//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the runner.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::model::CodecMode;

/// Root configuration for the model runner.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RunnerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Wire representation and response behavior.
    pub codec: CodecConfig,

    /// Downstream subscriber endpoints.
    pub downstream: DownstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3330").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3330".to_string(),
        }
    }
}

/// Codec mode and response behavior.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CodecConfig {
    /// Wire representation: "binary" or "json".
    pub mode: CodecMode,

    /// When true, successful responses carry the encoded output payload.
    /// When false, they carry a fixed acknowledgement.
    pub echo_output: bool,
}

/// Downstream forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Subscriber URLs receiving a copy of every successful output.
    /// Order is preserved; entries are not deduplicated.
    pub targets: Vec<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds, enforced by the HTTP layer.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether to expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3330");
        assert_eq!(config.codec.mode, CodecMode::Binary);
        assert!(!config.codec.echo_output);
        assert!(config.downstream.targets.is_empty());
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_minimal_toml() {
        let config: RunnerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3330");
    }

    #[test]
    fn test_partial_toml() {
        let text = r#"
            [codec]
            mode = "json"
            echo_output = true

            [downstream]
            targets = ["http://127.0.0.1:9001/hook", "http://127.0.0.1:9002/hook"]
        "#;
        let config: RunnerConfig = toml::from_str(text).unwrap();
        assert_eq!(config.codec.mode, CodecMode::Json);
        assert!(config.codec.echo_output);
        assert_eq!(config.downstream.targets.len(), 2);
        // Unspecified sections keep their defaults.
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
