use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::error::{decode_failure, BackendError};
use crate::api::traits::ListingBackend;
use crate::api::types::CreateListingRequest;
use crate::models::{Listing, Page};

/// Base URL used when `PROPERTY_API_BASE` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Name of the environment variable overriding the backend base URL
pub const BASE_URL_ENV: &str = "PROPERTY_API_BASE";

/// reqwest-backed implementation of [`ListingBackend`]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Create a backend client from `PROPERTY_API_BASE`, falling back to the
    /// compiled-in default
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(decode_failure(status, &body));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ListingBackend for HttpBackend {
    async fn list(&self, page: u32, size: u32) -> Result<Page<Listing>, BackendError> {
        let url = self.url("/properties");
        debug!("GET {url}?page={page}&size={size}");
        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn get(&self, id: i64) -> Result<Listing, BackendError> {
        let url = self.url(&format!("/properties/{id}"));
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn create(&self, request: &CreateListingRequest) -> Result<Listing, BackendError> {
        let url = self.url("/properties");
        debug!("POST {url}");
        let response = self.client.post(url).json(request).send().await?;
        Self::read_json(response).await
    }

    async fn update(&self, id: i64, listing: &Listing) -> Result<Listing, BackendError> {
        let url = self.url(&format!("/properties/{id}"));
        debug!("PUT {url}");
        let response = self.client.put(url).json(listing).send().await?;
        Self::read_json(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        let url = self.url(&format!("/properties/{id}"));
        debug!("DELETE {url}");
        let response = self.client.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(decode_failure(status, &body));
        }
        Ok(())
    }
}
