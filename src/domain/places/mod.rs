//! Discovery of candidate kava bars via an external place provider, plus
//! the map-facing marker bookkeeping that renders the results.

pub mod debounce;
pub mod markers;
pub mod search;

pub use self::debounce::Debouncer;
pub use self::markers::{MarkerBoard, MarkerCanvas, MarkerHandle, MarkerIcon};
pub use self::search::{PlaceSearch, DEFAULT_RADIUS_M};
