//! Workout tracker: keeps the store, the map, the list and storage in sync.
//!
//! Every public operation completes all of its view and storage side effects
//! before returning, so callers on the UI thread never observe a half-applied
//! mutation.

use thiserror::Error;

use super::persistence;
use super::store::{SortField, StoreError, TrackedWorkout, WorkoutStore};
use super::views::{ListView, MapView, MarkerPopup};
use crate::storage::{KeyValueStore, MapSettings, StorageError};
use crate::workouts::{
    Clock, Coordinates, ValidationError, WorkoutId, WorkoutRecord, WorkoutSubmission,
};

/// Manager for the workout collection and its projections.
pub struct WorkoutTracker<M: MapView, L: ListView, S: KeyValueStore> {
    store: WorkoutStore<M::Marker, L::Element>,
    map: Option<M>,
    list: L,
    storage: S,
    clock: Box<dyn Clock>,
    settings: MapSettings,
    sort_field: Option<SortField>,
}

impl<M: MapView, L: ListView, S: KeyValueStore> WorkoutTracker<M, L, S> {
    /// Create a tracker with an empty store and no map attached.
    pub fn new(list: L, storage: S, clock: Box<dyn Clock>, settings: MapSettings) -> Self {
        Self {
            store: WorkoutStore::new(),
            map: None,
            list,
            storage,
            clock,
            settings,
            sort_field: None,
        }
    }

    /// Replace the in-memory workouts with the persisted ones.
    ///
    /// A missing storage key leaves the store empty. Returns the number of
    /// workouts loaded.
    pub fn rehydrate(&mut self) -> Result<usize, TrackerError> {
        let records = persistence::load_records(&self.storage)?;

        self.release_all();
        self.sort_field = None;

        for record in records {
            let element = self.list.render_entry(&record);
            let marker = self.map.as_mut().map(|map| {
                map.place_marker(record.coordinates, &MarkerPopup::for_record(&record))
            });
            self.store.push(record, marker, element);
        }

        tracing::info!("Loaded {} workouts from storage", self.store.len());
        Ok(self.store.len())
    }

    /// Attach a map centered on `position` and place markers for every
    /// workout that does not have one yet.
    pub fn attach_map(&mut self, mut map: M, position: Coordinates) {
        map.center_on(position, self.settings.zoom);

        for entry in self.store.entries_mut() {
            if entry.marker.is_none() {
                let popup = MarkerPopup::for_record(&entry.record);
                entry.marker = Some(map.place_marker(entry.record.coordinates, &popup));
            }
        }

        tracing::info!("Map attached at {}", position);
        self.map = Some(map);
    }

    /// Validate form input and record a new workout at `coordinates`.
    ///
    /// Invalid input changes nothing.
    pub fn submit(
        &mut self,
        coordinates: Coordinates,
        submission: WorkoutSubmission,
    ) -> Result<WorkoutId, TrackerError> {
        let record = submission
            .into_record(coordinates, self.clock.as_ref())
            .inspect_err(|e| tracing::debug!("Rejected workout input: {}", e))?;
        let id = record.id;
        self.add(record)?;
        Ok(id)
    }

    /// Append a workout, render it, and persist the collection.
    ///
    /// The workout stays in memory even if saving fails; the storage error is
    /// returned so the caller can report it.
    pub fn add(&mut self, record: WorkoutRecord) -> Result<(), TrackerError> {
        let element = self.list.render_entry(&record);
        let marker = self.map.as_mut().map(|map| {
            map.place_marker(record.coordinates, &MarkerPopup::for_record(&record))
        });

        tracing::info!("Added workout {} ({})", record.id, record.label);
        self.store.push(record, marker, element);

        if let Some(field) = self.sort_field {
            self.store.sort_by(field);
            self.redraw_list();
        }

        self.persist()
    }

    /// Remove the workout at `index` together with its marker and card.
    pub fn remove_at(&mut self, index: usize) -> Result<(), TrackerError> {
        let removed = self.store.remove_at(index)?;
        tracing::info!("Removed workout {}", removed.record.id);
        self.release(removed);
        self.persist()
    }

    /// Remove the workout with the given identifier.
    ///
    /// The index is resolved at call time. Returns `Ok(false)` without touching
    /// anything when the identifier is unknown.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> Result<bool, TrackerError> {
        let Some((_, index)) = self.store.find_by_id(id) else {
            tracing::debug!("Ignoring removal of unknown workout {}", id);
            return Ok(false);
        };
        self.remove_at(index)?;
        Ok(true)
    }

    /// Find a workout and its current index.
    pub fn find_by_id(&self, id: &WorkoutId) -> Option<(&WorkoutRecord, usize)> {
        self.store.find_by_id(id)
    }

    /// Center the map on a workout. Returns `false` for unknown identifiers or
    /// when no map is attached.
    pub fn focus(&mut self, id: &WorkoutId) -> bool {
        let Some((record, _)) = self.store.find_by_id(id) else {
            return false;
        };
        let coordinates = record.coordinates;

        match self.map.as_mut() {
            Some(map) => {
                map.center_on(coordinates, self.settings.zoom);
                true
            }
            None => false,
        }
    }

    /// Fit the map to every workout. Returns `false` when there is nothing to
    /// show or no map is attached.
    pub fn view_all(&mut self) -> bool {
        let Some(region) = self.store.bounding_region() else {
            return false;
        };
        let padding = self.settings.fit_padding;

        match self.map.as_mut() {
            Some(map) => {
                map.fit_bounds(region, [padding, padding]);
                true
            }
            None => false,
        }
    }

    /// Reorder the workouts ascending by `field`, redraw the list and persist
    /// the new order. Later additions keep the order. Markers stay where they
    /// are.
    ///
    /// Cards stack newest on top, so the sidebar reads from the largest value
    /// down, the same way it reads after the next rehydrate.
    pub fn sort_by(&mut self, field: SortField) -> Result<(), TrackerError> {
        self.store.sort_by(field);
        self.sort_field = Some(field);
        self.redraw_list();

        tracing::debug!("Sorted {} workouts by {}", self.store.len(), field);
        self.persist()
    }

    /// Ordering kept on every addition, `None` for insertion order.
    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_field
    }

    /// Remove every workout, wipe persisted data, and reset the list.
    pub fn clear_all(&mut self) -> Result<(), TrackerError> {
        let count = self.store.len();
        self.release_all();
        self.list.reset();
        self.sort_field = None;
        self.storage.remove(persistence::STORAGE_KEY).map_err(|e| {
            tracing::error!("Failed to remove saved workouts: {}", e);
            TrackerError::from(e)
        })?;
        tracing::info!("Cleared {} workouts", count);
        Ok(())
    }

    /// Write the current records to storage.
    pub fn persist(&self) -> Result<(), TrackerError> {
        persistence::save_records(&self.storage, self.store.records()).map_err(|e| {
            tracing::error!("Failed to save workouts: {}", e);
            TrackerError::from(e)
        })
    }

    /// The underlying store.
    pub fn store(&self) -> &WorkoutStore<M::Marker, L::Element> {
        &self.store
    }

    /// The attached map, if any.
    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    /// Mutable access to the attached map.
    pub fn map_mut(&mut self) -> Option<&mut M> {
        self.map.as_mut()
    }

    /// The list view.
    pub fn list(&self) -> &L {
        &self.list
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn redraw_list(&mut self) {
        self.list.reset();
        for entry in self.store.entries_mut() {
            entry.element = self.list.render_entry(&entry.record);
        }
    }

    fn release(&mut self, entry: TrackedWorkout<M::Marker, L::Element>) {
        if let (Some(marker), Some(map)) = (entry.marker, self.map.as_mut()) {
            map.remove_marker(marker);
        }
        self.list.remove_entry(entry.element);
    }

    fn release_all(&mut self) {
        for entry in self.store.drain() {
            self.release(entry);
        }
    }
}

/// Tracker errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
