// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::ClientConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))
}

/// GET a URL and decode its JSON body.
///
/// The body is read as text first so decode failures are reported as
/// `Decode` rather than folded into the transport error.
pub async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::network(url, format!("HTTP status {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| AppError::from_reqwest(url, e))?;
    serde_json::from_str(&body).map_err(|e| AppError::decode(url, e))
}

/// POST a JSON body to a URL, expecting a 2xx response.
pub async fn post_json<B: Serialize>(client: &reqwest::Client, url: &str, body: &B) -> Result<()> {
    let payload = serde_json::to_vec(body)?;
    let response = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
        .map_err(|e| AppError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::network(url, format!("HTTP status {status}")));
    }
    Ok(())
}
