use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header::RANGE;
use tracing::debug;

use super::error::FetchError;
use super::types::Page;

pub struct VideoClient {
    http: reqwest::Client,
    endpoint: String,
}

impl VideoClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one page of video URLs. Pages are 1-based.
    pub async fn fetch_page(&self, page: u32) -> Result<Page, FetchError> {
        debug!(page, endpoint = %self.endpoint, "fetching page");
        let body = self
            .http
            .get(&self.endpoint)
            .query(&[("page", page)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(Page::from_json(value))
    }

    /// Check that a video URL is reachable and servable.
    ///
    /// Servers that reject `HEAD` get a one-byte ranged `GET` instead.
    pub async fn probe(&self, url: &str) -> Result<(), FetchError> {
        let response = self.http.head(url).send().await?;
        if response.status() != StatusCode::METHOD_NOT_ALLOWED {
            response.error_for_status()?;
            return Ok(());
        }
        self.http
            .get(url)
            .header(RANGE, "bytes=0-0")
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl Clone for VideoClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}
