// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page as UTF-8 text.
///
/// A non-success status is an error, and so is a body that is not valid
/// UTF-8: such a page cannot be read as markup.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        log::error!("Unable to access URL {url} (status {status})");
        return Err(AppError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    decode_utf8(url, bytes.to_vec())
}

/// Decode a page body. Invalid UTF-8 is an error, never replaced.
pub fn decode_utf8(url: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| AppError::Encoding {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Where the listings page comes from.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the raw listings page.
    async fn fetch(&self) -> Result<String>;
}

/// Fetches the listings page over HTTP.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(config: &HttpConfig, url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ListingSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        log::debug!("Fetching listings from {}", self.url);
        fetch_text(&self.client, &self.url).await
    }
}
