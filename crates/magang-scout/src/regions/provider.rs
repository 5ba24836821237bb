use std::future::Future;

use axum::http::StatusCode;
use reqwest::{Client, Url};

use super::domain::{Region, RegionCode, RegionListing};

/// Source of the province/regency hierarchy so resolution can be exercised without the network.
pub trait RegionProvider: Send + Sync {
    fn provinces(&self) -> impl Future<Output = Result<Vec<Region>, RegionError>> + Send;

    fn regencies(
        &self,
        province: &RegionCode,
    ) -> impl Future<Output = Result<Vec<Region>, RegionError>> + Send;
}

/// Failure modes when talking to the region provider.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("region provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("region provider responded with HTTP {0}")]
    Status(StatusCode),
    #[error("region payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("region endpoint cannot be derived from '{0}'")]
    Endpoint(String),
}

/// HTTP client for the wilayah.id region API.
///
/// Provinces live at `{base}/provinces.json` and the regencies of one province at
/// `{base}/regencies/{code}.json`; both answer with `{ "data": [{ "code", "name" }] }`.
#[derive(Clone)]
pub struct WilayahClient {
    client: Client,
    base_url: Url,
}

impl WilayahClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RegionError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegionError::Endpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Region>, RegionError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegionError::Status(status));
        }

        let body = response.bytes().await?;
        let listing: RegionListing = serde_json::from_slice(&body)?;
        Ok(listing.data)
    }
}

impl RegionProvider for WilayahClient {
    async fn provinces(&self) -> Result<Vec<Region>, RegionError> {
        let url = self.endpoint(&["provinces.json"])?;
        self.fetch(url).await
    }

    async fn regencies(&self, province: &RegionCode) -> Result<Vec<Region>, RegionError> {
        let file = format!("{}.json", province.as_str());
        let url = self.endpoint(&["regencies", &file])?;
        self.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> WilayahClient {
        WilayahClient::new(Client::new(), Url::parse(base).expect("valid url"))
    }

    #[test]
    fn endpoints_extend_the_base_path() {
        let wilayah = client("https://wilayah.id/api/");
        let url = wilayah.endpoint(&["provinces.json"]).expect("endpoint");
        assert_eq!(url.as_str(), "https://wilayah.id/api/provinces.json");

        let url = wilayah
            .endpoint(&["regencies", "36.json"])
            .expect("endpoint");
        assert_eq!(url.as_str(), "https://wilayah.id/api/regencies/36.json");
    }

    #[test]
    fn province_codes_cannot_escape_the_regency_path() {
        let wilayah = client("https://wilayah.id/api/");
        let url = wilayah
            .endpoint(&["regencies", "../secret.json"])
            .expect("endpoint");
        assert!(url.path().starts_with("/api/regencies/"));
    }
}
