//! HTTP-backed image cache warming.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::images::ImageCache;
use crate::models::ClientConfig;
use crate::utils::http::create_async_client;

/// Warms images by fetching and draining them over the shared client.
///
/// The draw wins come from the connection pool and any intermediate HTTP
/// cache; the bytes themselves are discarded.
pub struct HttpImageCache {
    client: reqwest::Client,
}

impl HttpImageCache {
    /// Create a cache with its own configured client.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }

    /// Create a cache sharing an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageCache for HttpImageCache {
    async fn prefetch(&self, uri: &str) -> Result<()> {
        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| AppError::from_reqwest(uri, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::network(uri, format!("HTTP status {status}")));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::from_reqwest(uri, e))?;
        Ok(())
    }
}
