//! Port over an external place-search provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bar::Coordinates;

/// Provider-assigned place identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider place category used to scope a keyword search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    Bar,
    Cafe,
}

impl PlaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Cafe => "cafe",
        }
    }
}

/// A place returned by the provider. Fields beyond the identifier and name
/// are best effort; enrichment may fill them in later.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub location: Option<Coordinates>,
    /// Provider-assigned category tags, lowercased.
    pub kinds: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Errors surfaced by [`PlacesSource`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum PlacesSourceError {
    /// The provider rejected the request as malformed.
    #[error("place search request rejected: {0}")]
    InvalidRequest(String),
    /// The provider could not be reached.
    #[error("place search transport failure: {0}")]
    Transport(String),
    /// The provider did not respond in time.
    #[error("place search timed out")]
    Timeout,
    /// The provider throttled the request.
    #[error("place search rate limited")]
    RateLimited,
    /// The response body could not be decoded.
    #[error("failed to decode place search response: {0}")]
    Decode(String),
}

/// External place-search provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesSource: Send + Sync {
    /// Keyword search for places of `kind` within `radius_m` of `center`.
    async fn nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        keyword: &str,
        kind: PlaceKind,
    ) -> Result<Vec<Place>, PlacesSourceError>;

    /// Fetch full details for a single place.
    async fn details(&self, id: &PlaceId) -> Result<Place, PlacesSourceError>;
}
