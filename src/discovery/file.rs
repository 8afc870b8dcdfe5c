use super::{extract_candidates, Discoverer};
use crate::error::{AppError, Result};
use crate::models::RawRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Discoverer reading JSON bodies from local files
#[derive(Debug, Clone)]
pub struct FileDiscoverer {
    paths: Vec<PathBuf>,
}

impl FileDiscoverer {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

#[async_trait]
impl Discoverer for FileDiscoverer {
    fn name(&self) -> &str {
        "file"
    }

    /// Every configured file must be readable JSON; the first bad file fails the call
    async fn discover(&self) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();

        for path in &self.paths {
            let source_ref = path.display().to_string();

            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::discovery(self.name(), format!("Failed to read {}: {}", source_ref, e))
            })?;

            let body: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
                AppError::discovery(self.name(), format!("Invalid JSON in {}: {}", source_ref, e))
            })?;

            let found = extract_candidates(&body, &source_ref);
            debug!(path = %source_ref, candidates = found.len(), "Read payload file");
            records.extend(found);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_each_file() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        write!(first, r#"{{"work_orders": [{{"id": "a"}}, {{"id": "b"}}]}}"#).unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        write!(second, r#"[{{"id": "c"}}]"#).unwrap();

        let discoverer =
            FileDiscoverer::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        let records = discoverer.discover().await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].source_ref, second.path().display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let discoverer = FileDiscoverer::new(vec![PathBuf::from("/nonexistent/orders.json")]);
        let err = discoverer.discover().await.unwrap_err();
        assert_eq!(err.error_code(), "DISCOVERY_FAILURE");
    }

    #[tokio::test]
    async fn test_invalid_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html>not json</html>").unwrap();

        let discoverer = FileDiscoverer::new(vec![file.path().to_path_buf()]);
        let err = discoverer.discover().await.unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
