//! Workout tracking.
//!
//! Owns the ordered workout collection and mediates every change so that the
//! map markers, the sidebar cards and the persisted list always agree:
//! - `store`: the collection itself
//! - `views`: the map and list seams it drives
//! - `persistence`: the JSON list kept in key/value storage
//! - `manager`: the operations tying them together

pub mod manager;
pub mod persistence;
pub mod store;
pub mod views;

pub use manager::{TrackerError, WorkoutTracker};
pub use persistence::STORAGE_KEY;
pub use store::{SortField, StoreError, TrackedWorkout, WorkoutStore};
pub use views::{BoundingRegion, ListView, MapView, MarkerPopup};
