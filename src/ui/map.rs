//! Workout map drawn with egui_plot.
//!
//! Longitude runs along the x axis and latitude along the y axis with a 1:1
//! data aspect. Zoom levels follow the usual slippy-map convention of 256
//! point tiles, so zoom 15 shows roughly a neighbourhood.

use std::collections::BTreeMap;

use egui::{Align2, RichText, Ui, Vec2};
use egui_plot::{MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};

use super::theme::kind_color;
use crate::tracker::{BoundingRegion, MapView, MarkerPopup};
use crate::workouts::{Coordinates, WorkoutKind};

/// Tile edge length in points for zoom calculations.
const TILE_SIZE: f64 = 256.0;

/// Smallest span in degrees a fitted region is widened to.
const MIN_FIT_SPAN: f64 = 0.002;

/// Handle to a marker placed on a [`PlotMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

#[derive(Debug, Clone)]
struct PlacedMarker {
    coordinates: Coordinates,
    popup: MarkerPopup,
}

/// Pending change of the visible area, applied on the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    /// Center on a position at a zoom level
    Center { coordinates: Coordinates, zoom: u8 },
    /// Show a whole region with padding in points
    Fit {
        region: BoundingRegion,
        padding: [f32; 2],
    },
}

/// Interactive map of workout markers.
#[derive(Debug, Default)]
pub struct PlotMap {
    markers: BTreeMap<MarkerId, PlacedMarker>,
    next_id: u64,
    pending_view: Option<ViewRequest>,
}

impl PlotMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of markers on the map.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Positions of every marker.
    pub fn marker_positions(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.markers.values().map(|marker| marker.coordinates)
    }

    /// View change waiting to be applied.
    pub fn pending_view(&self) -> Option<&ViewRequest> {
        self.pending_view.as_ref()
    }

    /// Draw the map. Returns the position the user clicked, if any.
    pub fn show(&mut self, ui: &mut Ui) -> Option<Coordinates> {
        let size = ui.available_size();
        let request = self.pending_view.take();
        let markers = &self.markers;

        let response = Plot::new("workout_map")
            .data_aspect(1.0)
            .allow_double_click_reset(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .label_formatter(|_name, value| format!("{:.5}, {:.5}", value.y, value.x))
            .show(ui, |plot_ui| {
                if let Some(request) = request {
                    let (min, max) = view_bounds(&request, size);
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                }

                for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
                    let points: Vec<[f64; 2]> = markers
                        .values()
                        .filter(|marker| marker.popup.kind == kind)
                        .map(|marker| [marker.coordinates.lon, marker.coordinates.lat])
                        .collect();
                    if points.is_empty() {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(kind.to_string(), PlotPoints::new(points))
                            .shape(MarkerShape::Circle)
                            .radius(6.0)
                            .color(kind_color(kind)),
                    );
                }

                // Popups stay open for every marker
                for marker in markers.values() {
                    let position = PlotPoint::new(marker.coordinates.lon, marker.coordinates.lat);
                    let text = RichText::new(&marker.popup.text)
                        .strong()
                        .color(kind_color(marker.popup.kind));
                    plot_ui.text(
                        Text::new(marker.popup.text.clone(), position, text)
                            .anchor(Align2::CENTER_BOTTOM),
                    );
                }

                if plot_ui.response().clicked() {
                    plot_ui.pointer_coordinate()
                } else {
                    None
                }
            });

        response
            .inner
            .map(|point| Coordinates::new(point.y, point.x))
    }
}

impl MapView for PlotMap {
    type Marker = MarkerId;

    fn place_marker(&mut self, coordinates: Coordinates, popup: &MarkerPopup) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.insert(
            id,
            PlacedMarker {
                coordinates,
                popup: popup.clone(),
            },
        );
        tracing::debug!("Placed marker {:?} at {}", id, coordinates);
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        if self.markers.remove(&marker).is_none() {
            tracing::warn!("Removing unknown marker {:?}", marker);
        }
    }

    fn center_on(&mut self, coordinates: Coordinates, zoom: u8) {
        self.pending_view = Some(ViewRequest::Center { coordinates, zoom });
    }

    fn fit_bounds(&mut self, region: BoundingRegion, padding: [f32; 2]) {
        self.pending_view = Some(ViewRequest::Fit { region, padding });
    }
}

/// Plot bounds (`[lon, lat]` min and max) realizing a view request in a
/// viewport of `size` points.
pub fn view_bounds(request: &ViewRequest, size: Vec2) -> ([f64; 2], [f64; 2]) {
    let width = f64::from(size.x.max(1.0));
    let height = f64::from(size.y.max(1.0));

    let (center, degrees_per_point) = match *request {
        ViewRequest::Center { coordinates, zoom } => {
            let degrees_per_point = 360.0 / (2f64.powi(i32::from(zoom)) * TILE_SIZE);
            (coordinates, degrees_per_point)
        }
        ViewRequest::Fit { region, padding } => {
            let usable_width = (width - 2.0 * f64::from(padding[0])).max(1.0);
            let usable_height = (height - 2.0 * f64::from(padding[1])).max(1.0);
            let lon_span = (region.max_lon - region.min_lon).max(MIN_FIT_SPAN);
            let lat_span = (region.max_lat - region.min_lat).max(MIN_FIT_SPAN);
            let degrees_per_point = (lon_span / usable_width).max(lat_span / usable_height);
            (region.center(), degrees_per_point)
        }
    };

    let half_lon = degrees_per_point * width / 2.0;
    let half_lat = degrees_per_point * height / 2.0;

    (
        [center.lon - half_lon, center.lat - half_lat],
        [center.lon + half_lon, center.lat + half_lat],
    )
}
