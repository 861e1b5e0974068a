//! Reference data sources: where the geography tree comes from.
//!
//! The cascade only sees `dyn ReferenceSource`; the runner picks HTTP or a
//! local file from configuration, tests use `InlineSource`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::address::geography::ReferenceTree;
use crate::errors::FormError;

#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch(&self) -> Result<ReferenceTree, FormError>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// `GET <url>` returning the JSON dataset.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FormError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReferenceSource for HttpSource {
    async fn fetch(&self) -> Result<ReferenceTree, FormError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FormError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        let tree = ReferenceTree::from_json(&body)?;
        debug!(
            url = %self.url,
            countries = tree.countries().len(),
            "Reference data fetched"
        );
        Ok(tree)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Dataset read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceSource for FileSource {
    async fn fetch(&self) -> Result<ReferenceTree, FormError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FormError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(ReferenceTree::from_json(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Dataset already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InlineSource(pub ReferenceTree);

#[async_trait]
impl ReferenceSource for InlineSource {
    async fn fetch(&self) -> Result<ReferenceTree, FormError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "inline".to_string()
    }
}
