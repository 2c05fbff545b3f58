//! Parallel keyword search for kava venues with dedup and filtering.
//!
//! A single logical search fans out into several provider queries run
//! concurrently. Individual query failures degrade to empty result sets so
//! one throttled keyword never sinks the whole search.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::domain::bar::Coordinates;
use crate::domain::ports::{Place, PlaceKind, PlacesSource};

/// Keyword/category pairs issued for every search.
const BASE_QUERIES: &[(&str, PlaceKind)] = &[
    ("kava", PlaceKind::Bar),
    ("kava bar", PlaceKind::Bar),
    ("kava", PlaceKind::Cafe),
    ("lounge", PlaceKind::Cafe),
];

/// Extra query issued when kratom venues are included.
const KRATOM_QUERY: (&str, PlaceKind) = ("kratom", PlaceKind::Bar);

/// Default search radius in metres.
pub const DEFAULT_RADIUS_M: u32 = 20_000;

/// Fan-out place search over a [`PlacesSource`].
pub struct PlaceSearch {
    source: Arc<dyn PlacesSource>,
    include_kratom: bool,
}

impl PlaceSearch {
    pub fn new(source: Arc<dyn PlacesSource>) -> Self {
        Self {
            source,
            include_kratom: true,
        }
    }

    /// Skip the kratom query.
    pub fn without_kratom(mut self) -> Self {
        self.include_kratom = false;
        self
    }

    /// Search for kava venues around `center`.
    ///
    /// Results are deduplicated by place id (first-seen order, last result
    /// wins on content) and filtered to venues that plausibly serve kava.
    /// Each surviving place is enriched with provider details; enrichment
    /// failures fall back to the original listing.
    pub async fn search(&self, center: Coordinates, radius_m: u32) -> Vec<Place> {
        let mut queries: Vec<(&str, PlaceKind)> = BASE_QUERIES.to_vec();
        if self.include_kratom {
            queries.push(KRATOM_QUERY);
        }

        let results = join_all(queries.iter().map(|(keyword, kind)| {
            let source = Arc::clone(&self.source);
            async move {
                match source.nearby(center, radius_m, keyword, *kind).await {
                    Ok(places) => places,
                    Err(err) => {
                        warn!(keyword, kind = kind.as_str(), error = %err, "place query failed");
                        Vec::new()
                    }
                }
            }
        }))
        .await;

        let candidates = dedup(results.into_iter().flatten());
        debug!(candidates = candidates.len(), "deduplicated place candidates");
        let filtered: Vec<Place> = candidates.into_iter().filter(looks_like_kava_venue).collect();

        join_all(filtered.into_iter().map(|place| {
            let source = Arc::clone(&self.source);
            async move {
                match source.details(&place.id).await {
                    Ok(detailed) => detailed,
                    Err(err) => {
                        warn!(place_id = %place.id, error = %err, "detail lookup failed");
                        place
                    }
                }
            }
        }))
        .await
    }
}

/// Collapse duplicate place ids. The first occurrence fixes the position;
/// later occurrences overwrite the stored place.
fn dedup(places: impl Iterator<Item = Place>) -> Vec<Place> {
    let mut ordered: Vec<Place> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for place in places {
        match index.get(place.id.as_str()) {
            Some(&slot) => ordered[slot] = place,
            None => {
                index.insert(place.id.as_str().to_owned(), ordered.len());
                ordered.push(place);
            }
        }
    }
    ordered
}

/// Heuristic for whether a place plausibly serves kava: the name mentions
/// kava, or it is a lounge categorised as a bar or cafe. Kratom queries
/// widen the candidate pool but a kratom-only name does not pass by itself.
fn looks_like_kava_venue(place: &Place) -> bool {
    let name = place.name.to_lowercase();
    if name.contains("kava") {
        return true;
    }
    name.contains("lounge")
        && place
            .kinds
            .iter()
            .any(|kind| kind == "bar" || kind == "cafe")
}
