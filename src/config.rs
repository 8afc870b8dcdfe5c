use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an optional configuration file
pub const CONFIG_PATH_ENV: &str = "WO_INDEXER_CONFIG";

/// Prefix for environment overrides, e.g. `WO_INDEXER__INDEX__DEFAULT_SOURCE`
pub const ENV_PREFIX: &str = "WO_INDEXER";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where work orders are discovered
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Index and snapshot settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Logging
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the embedded defaults, an optional file and the
    /// environment, in increasing precedence.
    ///
    /// An explicit `path` must exist; the `WO_INDEXER_CONFIG` fallback is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            include_str!("../config/default.toml"),
            config::FileFormat::Toml,
        ));

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
                    builder = builder
                        .add_source(config::File::with_name(&env_path).required(false));
                }
            }
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("discovery.endpoints")
                    .with_list_parse_key("discovery.payload_paths")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Base URL of the factory API; when unset, `payload_paths` are read instead
    #[serde(default)]
    pub base_url: Option<String>,

    /// API paths probed under `base_url`
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// JSON files read by the file discoverer
    #[serde(default)]
    pub payload_paths: Vec<PathBuf>,

    /// Upper bound for a whole discovery call
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Per-request HTTP timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl DiscoveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoints: default_endpoints(),
            payload_paths: Vec::new(),
            timeout_secs: default_timeout(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Provenance tag stamped on normalized work orders
    #[serde(default = "default_source")]
    pub default_source: String,

    /// Export document the CLI loads before and saves after each command
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            snapshot_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_endpoints() -> Vec<String> {
    [
        "/api/work-orders",
        "/api/work_orders",
        "/api/tasks",
        "/api/jobs",
        "/api/queue",
        "/api/orders",
        "/api/v1/work-orders",
        "/api/v1/tasks",
        "/api/v1/jobs",
        "/api/v2/work-orders",
        "/api/v2/tasks",
        "/api/v2/jobs",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_timeout() -> u64 {
    120
}

fn default_request_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "wo-indexer".to_string()
}

fn default_source() -> String {
    crate::models::DEFAULT_SOURCE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config = Config::load(None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.discovery.endpoints.len(), 12);
        assert_eq!(config.discovery.timeout(), Duration::from_secs(120));
        assert_eq!(config.index.default_source, "8090_factory");
        assert_eq!(config.observability.log_level, "info");
        assert!(config.discovery.base_url.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[discovery]\nbase_url = \"http://factory.local:8090\"\ntimeout_secs = 5\n\n[index]\ndefault_source = \"plant_b\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.discovery.base_url.as_deref(), Some("http://factory.local:8090"));
        assert_eq!(config.discovery.timeout_secs, 5);
        assert_eq!(config.discovery.request_timeout_secs, 10);
        assert_eq!(config.index.default_source, "plant_b");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/wo-indexer.toml"))).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
