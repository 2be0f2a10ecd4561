//! Trailmark - map-based workout log
//!
//! Click a point on the map, enter a run or a ride, and the workout is kept
//! as a marker on the map and a card in the sidebar, persisted between
//! sessions.

pub mod location;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod workouts;

// Re-export commonly used types
pub use storage::config::AppConfig;
pub use tracker::WorkoutTracker;
pub use workouts::{Coordinates, WorkoutId, WorkoutKind, WorkoutRecord};
