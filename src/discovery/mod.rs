//! Work-order discovery
//!
//! A [`Discoverer`] produces the raw candidate payloads for one indexing run.
//! Each call is a fresh, finite pass over its source.

mod extract;
mod file;
mod http;
mod static_source;

pub use extract::{extract_candidates, COLLECTION_KEYS};
pub use file::FileDiscoverer;
pub use http::HttpDiscoverer;
pub use static_source::StaticDiscoverer;

use crate::config::DiscoveryConfig;
use crate::error::{AppError, Result};
use crate::models::RawRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of raw work-order payloads
#[async_trait]
pub trait Discoverer: Send + Sync {
    /// Discoverer name, used in logs and errors
    fn name(&self) -> &str;

    /// Yield every candidate currently visible at the source
    async fn discover(&self) -> Result<Vec<RawRecord>>;
}

/// Pick the discoverer the configuration describes: HTTP when `base_url` is
/// set, otherwise the configured payload files.
pub fn from_config(config: &DiscoveryConfig) -> Result<Arc<dyn Discoverer>> {
    if config.base_url.is_some() {
        return Ok(Arc::new(HttpDiscoverer::from_config(config)?));
    }

    if config.payload_paths.is_empty() {
        return Err(AppError::Configuration(
            "Set discovery.base_url or discovery.payload_paths to index work orders".to_string(),
        ));
    }

    Ok(Arc::new(FileDiscoverer::new(config.payload_paths.clone())))
}
