//! Presentation seams driven by the tracker.
//!
//! The tracker never inspects marker or element handles; it only hands them
//! back to the view that created them.

use crate::workouts::{Coordinates, WorkoutKind, WorkoutRecord};

/// Tight bounding box around a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingRegion {
    /// Compute the region covering all points, or `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        points.into_iter().fold(None, |region, point| {
            Some(match region {
                None => Self {
                    min_lat: point.lat,
                    max_lat: point.lat,
                    min_lon: point.lon,
                    max_lon: point.lon,
                },
                Some(r) => Self {
                    min_lat: r.min_lat.min(point.lat),
                    max_lat: r.max_lat.max(point.lat),
                    min_lon: r.min_lon.min(point.lon),
                    max_lon: r.max_lon.max(point.lon),
                },
            })
        })
    }

    /// Whether the point lies inside the region (edges included).
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }

    /// Center of the region.
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Popup content attached to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    /// Text shown in the popup
    pub text: String,
    /// Kind of workout, used for styling
    pub kind: WorkoutKind,
}

impl MarkerPopup {
    /// Popup for a workout record.
    pub fn for_record(record: &WorkoutRecord) -> Self {
        Self {
            text: record.popup_text(),
            kind: record.kind(),
        }
    }
}

/// Map capable of showing workout markers.
pub trait MapView {
    /// Handle to a placed marker
    type Marker;

    /// Place a marker with an open popup.
    fn place_marker(&mut self, coordinates: Coordinates, popup: &MarkerPopup) -> Self::Marker;

    /// Remove a marker and release its resources.
    fn remove_marker(&mut self, marker: Self::Marker);

    /// Center the view on a position at the given zoom level.
    fn center_on(&mut self, coordinates: Coordinates, zoom: u8);

    /// Fit the view to a region, keeping `padding` points free on each side.
    fn fit_bounds(&mut self, region: BoundingRegion, padding: [f32; 2]);
}

/// Sidebar list of workout cards.
///
/// The most recently rendered card is shown on top, so a list filled in store
/// order reads from the last workout to the first.
pub trait ListView {
    /// Handle to a rendered card
    type Element;

    /// Render a card for the record above every existing card.
    fn render_entry(&mut self, record: &WorkoutRecord) -> Self::Element;

    /// Remove a previously rendered card.
    fn remove_entry(&mut self, element: Self::Element);

    /// Drop every card and return to the empty state.
    fn reset(&mut self);
}
