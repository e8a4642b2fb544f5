//! Unsplash photo search client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{PhotoError, PhotoSearch};

/// Unsplash search API client
pub struct UnsplashClient {
    access_key: String,
    base_url: String,
    http: Client,
}

impl UnsplashClient {
    /// Create a client for the given credential and API base URL
    pub fn new(access_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self, PhotoError> {
        let http = Client::builder().timeout(timeout).build().map_err(PhotoError::Network)?;

        Ok(Self {
            access_key: access_key.into(),
            base_url: base_url.into(),
            http,
        })
    }
}

#[async_trait]
impl PhotoSearch for UnsplashClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, PhotoError> {
        debug!(%query, "UnsplashClient::search: called");
        let url = format!("{}/search/photos", self.base_url);

        let response = self
            .http
            .get(url)
            .query(&[("query", query), ("per_page", "3"), ("orientation", "landscape")])
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| PhotoError::InvalidResponse(e.to_string()))?;

        Ok(body.results.into_iter().map(|photo| photo.urls.regular).collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}
