//! Marker bookkeeping for the two map collections.
//!
//! Place markers (provider search results) and bar markers (listings from
//! our own catalog) are tracked separately. A refresh of either collection
//! clears only that collection before redrawing it.

use std::collections::HashMap;

use crate::domain::bar::{Bar, Coordinates};
use crate::domain::ports::{Place, PlaceId};

/// Opaque handle to a drawn marker, issued by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Icon variants a marker can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Place,
    PlaceHighlighted,
    Bar,
}

/// Drawing surface the board renders onto.
pub trait MarkerCanvas {
    fn draw(&mut self, location: Coordinates, label: &str, icon: MarkerIcon) -> MarkerHandle;
    fn erase(&mut self, handle: MarkerHandle);
    fn set_icon(&mut self, handle: MarkerHandle, icon: MarkerIcon);
}

/// Tracks every marker currently on the map.
pub struct MarkerBoard<C> {
    canvas: C,
    place_markers: HashMap<PlaceId, MarkerHandle>,
    bar_markers: Vec<MarkerHandle>,
    highlighted: Option<PlaceId>,
}

impl<C: MarkerCanvas> MarkerBoard<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            place_markers: HashMap::new(),
            bar_markers: Vec::new(),
            highlighted: None,
        }
    }

    /// Replace the place-marker collection with markers for `places`.
    /// Places without a location are skipped.
    pub fn render_places(&mut self, places: &[Place]) {
        for (_, handle) in self.place_markers.drain() {
            self.canvas.erase(handle);
        }
        self.highlighted = None;
        for place in places {
            let Some(location) = place.location else {
                continue;
            };
            let handle = self.canvas.draw(location, &place.name, MarkerIcon::Place);
            self.place_markers.insert(place.id.clone(), handle);
        }
    }

    /// Replace the bar-marker collection with markers for `bars`.
    pub fn render_bars(&mut self, bars: &[Bar]) {
        for handle in self.bar_markers.drain(..) {
            self.canvas.erase(handle);
        }
        for bar in bars {
            let Ok(location) = bar.coordinates() else {
                continue;
            };
            let handle = self.canvas.draw(location, &bar.name, MarkerIcon::Bar);
            self.bar_markers.push(handle);
        }
    }

    /// Highlight one place marker, reverting any previous highlight.
    /// Unknown ids are ignored.
    pub fn highlight(&mut self, id: &PlaceId) {
        if !self.place_markers.contains_key(id) {
            return;
        }
        self.unhighlight();
        if let Some(&handle) = self.place_markers.get(id) {
            self.canvas.set_icon(handle, MarkerIcon::PlaceHighlighted);
            self.highlighted = Some(id.clone());
        }
    }

    /// Revert the current highlight, if any.
    pub fn unhighlight(&mut self) {
        if let Some(id) = self.highlighted.take() {
            if let Some(&handle) = self.place_markers.get(&id) {
                self.canvas.set_icon(handle, MarkerIcon::Place);
            }
        }
    }

    /// Remove every marker from both collections.
    pub fn clear_all(&mut self) {
        for (_, handle) in self.place_markers.drain() {
            self.canvas.erase(handle);
        }
        for handle in self.bar_markers.drain(..) {
            self.canvas.erase(handle);
        }
        self.highlighted = None;
    }

    pub fn place_marker_count(&self) -> usize {
        self.place_markers.len()
    }

    pub fn bar_marker_count(&self) -> usize {
        self.bar_markers.len()
    }
}
