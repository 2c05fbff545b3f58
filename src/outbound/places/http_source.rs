//! Reqwest-backed place provider adapter.
//!
//! Owns transport concerns only: request construction, timeout and status
//! mapping, and JSON decoding into domain places.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::bar::Coordinates;
use crate::domain::ports::{Place, PlaceId, PlaceKind, PlacesSource, PlacesSourceError};

use super::dto::{DetailsResponseDto, NearbyResponseDto};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const BODY_PREVIEW_LIMIT: usize = 256;

/// Place provider adapter speaking the provider's JSON HTTP API.
pub struct PlacesHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl PlacesHttpSource {
    /// Build an adapter with the default request timeout.
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, api_key, DEFAULT_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    pub fn with_timeout(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, PlacesSourceError> {
        self.endpoint
            .join(path)
            .map_err(|err| PlacesSourceError::InvalidRequest(err.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> PlacesSourceError {
    if error.is_timeout() {
        PlacesSourceError::Timeout
    } else {
        PlacesSourceError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PlacesSourceError {
    let preview = String::from_utf8_lossy(&body[..body.len().min(BODY_PREVIEW_LIMIT)]).into_owned();
    match status {
        StatusCode::TOO_MANY_REQUESTS => PlacesSourceError::RateLimited,
        status if status.is_client_error() => {
            PlacesSourceError::InvalidRequest(format!("{status}: {preview}"))
        }
        status => PlacesSourceError::Transport(format!("{status}: {preview}")),
    }
}

#[async_trait]
impl PlacesSource for PlacesHttpSource {
    async fn nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        keyword: &str,
        kind: PlaceKind,
    ) -> Result<Vec<Place>, PlacesSourceError> {
        if keyword.trim().is_empty() {
            return Err(PlacesSourceError::InvalidRequest(
                "keyword must not be empty".into(),
            ));
        }
        let mut url = self.url("nearby")?;
        url.query_pairs_mut()
            .append_pair(
                "location",
                &format!("{},{}", center.latitude(), center.longitude()),
            )
            .append_pair("radius", &radius_m.to_string())
            .append_pair("keyword", keyword)
            .append_pair("type", kind.as_str())
            .append_pair("key", &self.api_key);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: NearbyResponseDto = serde_json::from_slice(body.as_ref())
            .map_err(|err| PlacesSourceError::Decode(err.to_string()))?;
        Ok(decoded
            .results
            .into_iter()
            .map(|dto| dto.into_domain())
            .collect())
    }

    async fn details(&self, id: &PlaceId) -> Result<Place, PlacesSourceError> {
        let mut url = self.url("details")?;
        url.query_pairs_mut()
            .append_pair("place_id", id.as_str())
            .append_pair("key", &self.api_key);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: DetailsResponseDto = serde_json::from_slice(body.as_ref())
            .map_err(|err| PlacesSourceError::Decode(err.to_string()))?;
        Ok(decoded.result.into_domain())
    }
}
