//! Where dataset documents come from.
//!
//! A [`DatasetSource`] resolves a registry path (e.g.
//! `data/kfc_uk.json`) to a parsed JSON document. Two implementations ship:
//! [`HttpSource`] for datasets served over HTTP and [`DirSource`] for a local
//! directory. Neither retries, caches or cancels.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;

/// Fetches raw dataset documents by relative path.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Value, LoadError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl<S: DatasetSource + ?Sized> DatasetSource for Box<S> {
    async fn fetch(&self, path: &str) -> Result<Value, LoadError> {
        (**self).fetch(path).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Datasets served under a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Join the base URL and a relative dataset path with exactly one `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Value, LoadError> {
        let url = self.url_for(path);
        debug!(url = %url, "dataset_fetch");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Datasets stored below a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DatasetSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Value, LoadError> {
        let full = self.path_for(path);
        debug!(path = %full.display(), "dataset_read");
        let bytes = tokio::fs::read(&full).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining() {
        let source = HttpSource::with_client(reqwest::Client::new(), "https://example.test/menus/");
        assert_eq!(
            source.url_for("/data/kfc_uk.json"),
            "https://example.test/menus/data/kfc_uk.json"
        );
        assert_eq!(
            source.url_for("data/kfc_uk.json"),
            "https://example.test/menus/data/kfc_uk.json"
        );
    }

    #[tokio::test]
    async fn dir_source_reads_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/kfc_uk.json"), r#"[{"name":"Popcorn"}]"#).unwrap();
        std::fs::write(dir.path().join("data/broken.json"), "{").unwrap();

        let source = DirSource::new(dir.path());
        let doc = source.fetch("data/kfc_uk.json").await.unwrap();
        assert_eq!(doc[0]["name"], "Popcorn");

        let err = source.fetch("data/broken.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));

        let err = source.fetch("data/missing.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[tokio::test]
    async fn http_source_reports_transport_failure() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let source = HttpSource::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = source.fetch("data/kfc_uk.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Transport(_)));
    }
}
