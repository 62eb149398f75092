//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::schema::RunnerConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RunnerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RunnerConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Shape of the runtime.json settings artifact.
#[derive(Debug, Deserialize)]
struct RuntimeSettings {
    #[serde(default)]
    downstream: Vec<String>,
}

/// Load the downstream URL list from a runtime.json artifact.
///
/// A missing or unreadable artifact means "no downstream targets" and is
/// never fatal; the runner logs once and moves on. "Not configured" and
/// "misconfigured" are deliberately not distinguished.
pub fn load_downstream(path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            tracing::info!(path = %path.display(), "No runtime settings file, ignoring");
            return Vec::new();
        }
    };
    match serde_json::from_str::<RuntimeSettings>(&content) {
        Ok(settings) => settings.downstream,
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "Unreadable runtime settings, ignoring");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("runner-loader-{}-{}", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_roundtrip() {
        let path = temp_file("config.toml", "[listener]\nbind_address = \"127.0.0.1:4000\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/runner.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_bad_toml() {
        let path = temp_file("bad.toml", "[listener\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_downstream() {
        let path = temp_file(
            "runtime.json",
            r#"{"downstream": ["http://127.0.0.1:9001/a", "http://127.0.0.1:9002/b"]}"#,
        );
        let targets = load_downstream(&path);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0], "http://127.0.0.1:9001/a");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_runtime_settings_means_no_targets() {
        let targets = load_downstream(Path::new("/nonexistent/runtime.json"));
        assert!(targets.is_empty());
    }

    #[test]
    fn test_garbled_runtime_settings_means_no_targets() {
        let path = temp_file("garbled.json", "{downstream: oops");
        let targets = load_downstream(&path);
        assert!(targets.is_empty());
        let _ = fs::remove_file(path);
    }
}
