//! End-to-end tracker flows against recording views.

use std::cell::RefCell;
use std::rc::Rc;

use trailmark::storage::{KeyValueStore, MapSettings, MemoryStore};
use trailmark::tracker::{SortField, StoreError, TrackerError, WorkoutTracker, STORAGE_KEY};
use trailmark::ui::CardList;
use trailmark::workouts::{
    Coordinates, Field, FixedClock, ValidationError, WorkoutId, WorkoutSubmission,
};

use super::view_mock::{test_time, tracker_with, CallLog, MockMap, ViewCall};

fn new_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_add_then_find_returns_same_record() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));

    let id = tracker
        .submit(Coordinates::new(46.2, 6.1), WorkoutSubmission::running(7.5, 39.0, 171.0))
        .unwrap();

    let (record, index) = tracker.find_by_id(&id).unwrap();
    assert_eq!(index, 0);
    assert_eq!(record.id, id);
    assert_eq!(record.coordinates, Coordinates::new(46.2, 6.1));
    assert_eq!(record.metric(), 39.0 / 7.5);
    assert_eq!(record.label, "Running on April 14");
}

#[test]
fn test_submit_drives_views_in_order() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(1.0, 2.0));

    let id = tracker
        .submit(Coordinates::new(3.0, 4.0), WorkoutSubmission::cycling(20.0, 50.0, 120.0))
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            ViewCall::CenterOn(Coordinates::new(1.0, 2.0), 15),
            ViewCall::RenderEntry(1, id),
            ViewCall::PlaceMarker(1, Coordinates::new(3.0, 4.0), "🚴 Cycling on April 14".to_string()),
        ]
    );
    assert!(storage.get(STORAGE_KEY).unwrap().is_some());
}

#[test]
fn test_remove_at_keeps_order_and_lockstep() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));

    let ids: Vec<WorkoutId> = (0..5)
        .map(|i| {
            tracker
                .submit(
                    Coordinates::new(i as f64, i as f64),
                    WorkoutSubmission::running(5.0 + i as f64, 30.0, 165.0),
                )
                .unwrap()
        })
        .collect();

    tracker.remove_at(2).unwrap();

    let store = tracker.store();
    assert_eq!(store.len(), 4);
    assert_eq!(store.records().count(), store.marker_handles().count());
    let remaining: Vec<WorkoutId> = store.records().map(|r| r.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[1], ids[3], ids[4]]);
    let markers: Vec<u32> = store.marker_handles().map(|m| *m.unwrap()).collect();
    assert_eq!(markers, vec![1, 2, 4, 5]);

    assert_eq!(tracker.map().unwrap().live, vec![1, 2, 4, 5]);
    assert_eq!(tracker.list().workout_ids(), remaining);
    assert!(log.borrow().contains(&ViewCall::RemoveMarker(3)));
    assert!(log.borrow().contains(&ViewCall::RemoveEntry(3)));

    let saved = trailmark::tracker::persistence::load_records(&storage).unwrap();
    assert_eq!(saved.iter().map(|r| r.id).collect::<Vec<_>>(), remaining);
}

#[test]
fn test_remove_at_out_of_bounds_changes_nothing() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker
        .submit(Coordinates::new(0.0, 0.0), WorkoutSubmission::running(5.0, 30.0, 165.0))
        .unwrap();
    let calls_before = log.borrow().len();

    assert_eq!(
        tracker.remove_at(1),
        Err(TrackerError::Store(StoreError::IndexOutOfBounds { index: 1, len: 1 }))
    );
    assert_eq!(tracker.store().len(), 1);
    assert_eq!(log.borrow().len(), calls_before);
}

#[test]
fn test_unknown_id_is_silent_noop() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));
    tracker
        .submit(Coordinates::new(0.0, 0.0), WorkoutSubmission::running(5.0, 30.0, 165.0))
        .unwrap();
    let saved_before = storage.get(STORAGE_KEY).unwrap();
    let calls_before = log.borrow().len();

    assert_eq!(tracker.remove_by_id(&WorkoutId::new()), Ok(false));
    assert!(tracker.find_by_id(&WorkoutId::new()).is_none());

    assert_eq!(tracker.store().len(), 1);
    assert_eq!(tracker.store().marker_handles().count(), 1);
    assert_eq!(log.borrow().len(), calls_before);
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), saved_before);
}

#[test]
fn test_deletions_resolve_index_by_id() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);

    let ids: Vec<WorkoutId> = (0..3)
        .map(|i| {
            tracker
                .submit(
                    Coordinates::new(i as f64, 0.0),
                    WorkoutSubmission::cycling(10.0, 30.0, 0.0),
                )
                .unwrap()
        })
        .collect();

    // Delete the last, then the first, in one batch
    assert_eq!(tracker.remove_by_id(&ids[2]), Ok(true));
    assert_eq!(tracker.remove_by_id(&ids[0]), Ok(true));

    let remaining: Vec<WorkoutId> = tracker.store().records().map(|r| r.id).collect();
    assert_eq!(remaining, vec![ids[1]]);
    assert_eq!(tracker.list().workout_ids(), vec![ids[1]]);
}

#[test]
fn test_validation_failure_changes_nothing() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));
    let calls_before = log.borrow().len();

    let result = tracker.submit(
        Coordinates::new(0.0, 0.0),
        WorkoutSubmission::running(5.0, 30.0, 0.0),
    );
    assert_eq!(
        result,
        Err(TrackerError::Validation(ValidationError::NotPositive(Field::Cadence)))
    );

    let result = tracker.submit(
        Coordinates::new(0.0, 0.0),
        WorkoutSubmission::cycling(f64::NAN, 30.0, 10.0),
    );
    assert_eq!(
        result,
        Err(TrackerError::Validation(ValidationError::NotFinite(Field::Distance)))
    );

    assert!(tracker.store().is_empty());
    assert_eq!(log.borrow().len(), calls_before);
    assert!(storage.is_empty());
}

#[test]
fn test_downhill_ride_is_accepted() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);

    let id = tracker
        .submit(Coordinates::new(0.0, 0.0), WorkoutSubmission::cycling(15.0, 25.0, -340.0))
        .unwrap();
    let (record, _) = tracker.find_by_id(&id).unwrap();
    assert_eq!(record.intensity(), -340.0);
    assert_eq!(record.metric(), 36.0);
}

#[test]
fn test_view_all_fits_every_workout() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));

    assert!(!tracker.view_all());

    for position in [Coordinates::new(10.0, 10.0), Coordinates::new(20.0, 20.0)] {
        tracker
            .submit(position, WorkoutSubmission::running(5.0, 30.0, 165.0))
            .unwrap();
    }
    assert!(tracker.view_all());

    let last = log.borrow().last().cloned().unwrap();
    let ViewCall::FitBounds(region, padding) = last else {
        panic!("expected fit_bounds, got {:?}", last);
    };
    assert_eq!((region.min_lat, region.max_lat), (10.0, 20.0));
    assert_eq!((region.min_lon, region.max_lon), (10.0, 20.0));
    assert_eq!(padding, [70.0, 70.0]);
}

#[test]
fn test_focus_centers_on_workout() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));
    let id = tracker
        .submit(Coordinates::new(-8.4, 115.2), WorkoutSubmission::running(5.0, 30.0, 165.0))
        .unwrap();

    assert!(tracker.focus(&id));
    assert_eq!(
        log.borrow().last(),
        Some(&ViewCall::CenterOn(Coordinates::new(-8.4, 115.2), 15))
    );
}

#[test]
fn test_clear_all_wipes_everything() {
    let storage = MemoryStore::new();
    let log = new_log();
    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));
    for i in 0..3 {
        tracker
            .submit(
                Coordinates::new(i as f64, 0.0),
                WorkoutSubmission::running(5.0, 30.0, 165.0),
            )
            .unwrap();
    }

    tracker.clear_all().unwrap();

    assert!(tracker.store().is_empty());
    assert!(tracker.map().unwrap().live.is_empty());
    assert!(tracker.list().entries.is_empty());
    assert_eq!(log.borrow().last(), Some(&ViewCall::Reset));
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);

    // A later session starts empty
    let mut next_session = tracker_with(&storage, &log);
    assert_eq!(next_session.rehydrate(), Ok(0));
}

#[test]
fn test_markers_placed_when_map_arrives_late() {
    let storage = MemoryStore::new();
    let log = new_log();
    {
        let mut first = tracker_with(&storage, &log);
        for i in 0..3 {
            first
                .submit(
                    Coordinates::new(i as f64, i as f64),
                    WorkoutSubmission::cycling(12.0, 40.0, 80.0),
                )
                .unwrap();
        }
    }

    let mut tracker = tracker_with(&storage, &log);
    assert_eq!(tracker.rehydrate(), Ok(3));
    assert!(tracker.store().marker_handles().all(|m| m.is_none()));

    // Deleting before the map exists keeps both projections aligned
    let first_id = tracker.store().get(0).unwrap().record.id;
    assert_eq!(tracker.remove_by_id(&first_id), Ok(true));

    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));
    assert_eq!(tracker.store().len(), 2);
    assert!(tracker.store().marker_handles().all(|m| m.is_some()));
    assert_eq!(tracker.map().unwrap().live.len(), 2);
}

fn card_tracker(storage: &MemoryStore) -> WorkoutTracker<MockMap, CardList, &MemoryStore> {
    WorkoutTracker::new(
        CardList::new(),
        storage,
        Box::new(FixedClock(test_time())),
        MapSettings::default(),
    )
}

fn card_distances(tracker: &WorkoutTracker<MockMap, CardList, &MemoryStore>) -> Vec<f64> {
    tracker
        .list()
        .cards()
        .iter()
        .map(|card| card.distance_km)
        .collect()
}

#[test]
fn test_sorted_sidebar_reads_the_same_after_reload() {
    let storage = MemoryStore::new();
    let mut tracker = card_tracker(&storage);
    for distance in [5.0, 20.0, 10.0] {
        tracker
            .submit(
                Coordinates::new(0.0, 0.0),
                WorkoutSubmission::running(distance, distance * 5.0, 170.0),
            )
            .unwrap();
    }
    assert_eq!(card_distances(&tracker), vec![10.0, 20.0, 5.0]);

    tracker.sort_by(SortField::Distance).unwrap();
    assert_eq!(card_distances(&tracker), vec![20.0, 10.0, 5.0]);

    // A later workout lands in its sorted place
    tracker
        .submit(
            Coordinates::new(0.0, 0.0),
            WorkoutSubmission::running(12.0, 60.0, 170.0),
        )
        .unwrap();
    assert_eq!(card_distances(&tracker), vec![20.0, 12.0, 10.0, 5.0]);

    let mut reloaded = card_tracker(&storage);
    assert_eq!(reloaded.rehydrate(), Ok(4));
    assert_eq!(card_distances(&reloaded), card_distances(&tracker));
    assert_eq!(reloaded.sort_field(), None);
}
