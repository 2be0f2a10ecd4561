//! Ordered collection of tracked workouts.
//!
//! Each entry keeps a record together with the handles of its map marker and
//! list card, so the record and marker sequences can never drift apart.

use thiserror::Error;

use super::views::BoundingRegion;
use crate::workouts::{WorkoutId, WorkoutRecord};

/// A workout together with its presentation handles.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedWorkout<M, E> {
    /// The workout data
    pub record: WorkoutRecord,
    /// Map marker, absent while no map is attached
    pub marker: Option<M>,
    /// Sidebar card
    pub element: E,
}

/// Field the workouts can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Distance,
    Duration,
}

impl SortField {
    /// Every field, in menu order.
    pub const ALL: [SortField; 3] = [SortField::Date, SortField::Distance, SortField::Duration];
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Date => write!(f, "Date"),
            SortField::Distance => write!(f, "Distance"),
            SortField::Duration => write!(f, "Duration"),
        }
    }
}

/// In-memory store of workouts in insertion order.
#[derive(Debug, Clone)]
pub struct WorkoutStore<M, E> {
    entries: Vec<TrackedWorkout<M, E>>,
}

impl<M, E> Default for WorkoutStore<M, E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<M, E> WorkoutStore<M, E> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout.
    pub fn push(&mut self, record: WorkoutRecord, marker: Option<M>, element: E) {
        self.entries.push(TrackedWorkout {
            record,
            marker,
            element,
        });
    }

    /// Remove the workout at `index`, shifting later entries down.
    pub fn remove_at(&mut self, index: usize) -> Result<TrackedWorkout<M, E>, StoreError> {
        if index >= self.entries.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Find a record and its current index by identifier.
    pub fn find_by_id(&self, id: &WorkoutId) -> Option<(&WorkoutRecord, usize)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.record.id == *id)
            .map(|(index, entry)| (&entry.record, index))
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&TrackedWorkout<M, E>> {
        self.entries.get(index)
    }

    /// All entries in order.
    pub fn entries(&self) -> &[TrackedWorkout<M, E>] {
        &self.entries
    }

    /// Mutable access to all entries, for attaching markers.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut TrackedWorkout<M, E>> {
        self.entries.iter_mut()
    }

    /// Records in order.
    pub fn records(&self) -> impl Iterator<Item = &WorkoutRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Marker handles in record order; `None` where no marker is placed.
    pub fn marker_handles(&self) -> impl Iterator<Item = Option<&M>> {
        self.entries.iter().map(|entry| entry.marker.as_ref())
    }

    /// Reorder ascending by `field`. Ties keep their current order and every
    /// entry keeps its own handles.
    pub fn sort_by(&mut self, field: SortField) {
        match field {
            SortField::Date => self
                .entries
                .sort_by_key(|entry| entry.record.created_at),
            SortField::Distance => self
                .entries
                .sort_by(|a, b| a.record.distance_km.total_cmp(&b.record.distance_km)),
            SortField::Duration => self
                .entries
                .sort_by(|a, b| a.record.duration_min.total_cmp(&b.record.duration_min)),
        }
    }

    /// Remove and return every entry.
    pub fn drain(&mut self) -> Vec<TrackedWorkout<M, E>> {
        std::mem::take(&mut self.entries)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of workouts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bounding box over every workout position, `None` when empty.
    pub fn bounding_region(&self) -> Option<BoundingRegion> {
        BoundingRegion::from_points(self.records().map(|record| record.coordinates))
    }
}

/// Store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Index {index} out of bounds for {len} workouts")]
    IndexOutOfBounds { index: usize, len: usize },
}
