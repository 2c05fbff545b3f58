//! HTTP adapter for the external place-search provider.

pub mod dto;
pub mod http_source;

pub use self::http_source::PlacesHttpSource;
