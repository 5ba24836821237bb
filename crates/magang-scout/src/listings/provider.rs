use std::future::Future;

use axum::http::StatusCode;
use reqwest::{Client, Url};

use super::domain::{ListingPage, ListingRecord};
use super::query::ListingQuery;

/// Source of raw vacancy records.
pub trait ListingProvider: Send + Sync {
    fn fetch(
        &self,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<Vec<ListingRecord>, ListingError>> + Send;
}

/// Whole-query failures. Per-record problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("listing provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("listing provider responded with HTTP {0}")]
    Status(StatusCode),
    #[error("listing payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the MagangHub active-vacancy endpoint.
#[derive(Clone)]
pub struct MagangHubClient {
    client: Client,
    url: Url,
}

impl MagangHubClient {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl ListingProvider for MagangHubClient {
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<ListingRecord>, ListingError> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&query.pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Status(status));
        }

        let body = response.bytes().await?;
        let page: ListingPage = serde_json::from_slice(&body)?;
        Ok(page.data.unwrap_or_default())
    }
}
