use super::{extract_candidates, Discoverer};
use crate::config::DiscoveryConfig;
use crate::error::{AppError, Result};
use crate::models::RawRecord;
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, warn};

/// Discoverer probing a set of API paths under one base URL
#[derive(Debug, Clone)]
pub struct HttpDiscoverer {
    client: Client,
    base_url: String,
    endpoints: Vec<String>,
}

impl HttpDiscoverer {
    pub fn new(
        base_url: impl Into<String>,
        endpoints: Vec<String>,
        request_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            endpoints,
        })
    }

    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            AppError::Configuration("discovery.base_url is required for HTTP discovery".to_string())
        })?;
        if config.endpoints.is_empty() {
            return Err(AppError::Configuration(
                "discovery.endpoints must list at least one API path".to_string(),
            ));
        }

        Self::new(
            base_url,
            config.endpoints.clone(),
            config.request_timeout(),
            &config.user_agent,
        )
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// GET one endpoint. `Ok(None)` means the server answered without a usable body.
    async fn fetch(&self, url: &str) -> std::result::Result<Option<serde_json::Value>, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Endpoint skipped");
            return Ok(None);
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => Ok(Some(body)),
            Err(e) => {
                warn!(url = %url, error = %e, "Endpoint returned a non-JSON body");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Discoverer for HttpDiscoverer {
    fn name(&self) -> &str {
        "http"
    }

    /// Probe every endpoint in order. Non-success responses are skipped; the
    /// call only fails when no endpoint could be reached at all.
    async fn discover(&self) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        let mut unreachable = 0usize;
        let mut last_error = None;

        for endpoint in &self.endpoints {
            let url = self.url_for(endpoint);

            match self.fetch(&url).await {
                Ok(Some(body)) => {
                    let found = extract_candidates(&body, &url);
                    debug!(url = %url, candidates = found.len(), "Endpoint probed");
                    records.extend(found);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(url = %url, error = %e, "Endpoint unreachable");
                    unreachable += 1;
                    last_error = Some(e.to_string());
                }
            }
        }

        if !self.endpoints.is_empty() && unreachable == self.endpoints.len() {
            return Err(AppError::discovery(
                self.name(),
                format!(
                    "No endpoint under {} was reachable: {}",
                    self.base_url,
                    last_error.unwrap_or_default()
                ),
            ));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discoverer(base_url: &str) -> HttpDiscoverer {
        HttpDiscoverer::new(
            base_url,
            vec!["/api/tasks".to_string()],
            Duration::from_secs(1),
            "wo-indexer-test",
        )
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let d = discoverer("http://factory.local:8090/");
        assert_eq!(d.url_for("/api/tasks"), "http://factory.local:8090/api/tasks");
        assert_eq!(d.url_for("api/jobs"), "http://factory.local:8090/api/jobs");
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let err = HttpDiscoverer::from_config(&DiscoveryConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_from_config_requires_endpoints() {
        let config = DiscoveryConfig {
            base_url: Some("http://factory.local:8090".to_string()),
            endpoints: Vec::new(),
            ..Default::default()
        };
        let err = HttpDiscoverer::from_config(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("discovery.endpoints"));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails() {
        // Nothing listens on the loopback discard port.
        let err = discoverer("http://127.0.0.1:9").discover().await.unwrap_err();
        assert_eq!(err.error_code(), "DISCOVERY_FAILURE");
    }
}
