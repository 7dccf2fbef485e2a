use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::fetch::{encode_document_path, DocumentFetcher};

/// Fetches `<base>/posts/<path>` over HTTP.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(3))
            .build()
            .context("Error creating HTTP client")?;

        Ok(HttpFetcher {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn document_url(&self, path: &str) -> String {
        format!("{}/posts/{}", self.base_url, encode_document_path(path))
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.document_url(path);
        let response = self.client.get(&url)
            .send()
            .await
            .with_context(|| format!("Error requesting {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Failed to fetch {}: HTTP {}", path, status);
        }

        let text = response.text()
            .await
            .with_context(|| format!("Error reading body of {}", url))?;
        Ok(text)
    }
}
