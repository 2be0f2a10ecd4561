//! Persistence across tracker sessions.

use std::cell::RefCell;
use std::rc::Rc;

use tempfile::TempDir;
use trailmark::storage::{FileStore, KeyValueStore, MapSettings, MemoryStore, StorageError};
use trailmark::tracker::{TrackerError, WorkoutTracker, STORAGE_KEY};
use trailmark::workouts::{Coordinates, FixedClock, WorkoutKind, WorkoutSubmission};

use super::view_mock::{test_time, tracker_with, CallLog, MockList, MockMap};

fn new_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_empty_collection_round_trips() {
    let storage = MemoryStore::new();
    let log = new_log();

    let first = tracker_with(&storage, &log);
    first.persist().unwrap();
    assert_eq!(storage.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));

    let mut second = tracker_with(&storage, &log);
    assert_eq!(second.rehydrate(), Ok(0));
    assert!(second.store().is_empty());
}

#[test]
fn test_missing_key_and_null_load_empty() {
    let storage = MemoryStore::new();
    let log = new_log();

    let mut tracker = tracker_with(&storage, &log);
    assert_eq!(tracker.rehydrate(), Ok(0));

    storage.set(STORAGE_KEY, "null").unwrap();
    assert_eq!(tracker.rehydrate(), Ok(0));
}

#[test]
fn test_records_survive_a_new_session() {
    let storage = MemoryStore::new();
    let log = new_log();

    let mut first = tracker_with(&storage, &log);
    first
        .submit(Coordinates::new(51.5, -0.12), WorkoutSubmission::running(10.0, 52.0, 178.0))
        .unwrap();
    first
        .submit(Coordinates::new(51.6, -0.10), WorkoutSubmission::cycling(42.0, 95.0, -120.0))
        .unwrap();
    let saved: Vec<_> = first.store().records().cloned().collect();

    let mut second = tracker_with(&storage, &log);
    assert_eq!(second.rehydrate(), Ok(2));
    let loaded: Vec<_> = second.store().records().cloned().collect();

    assert_eq!(loaded, saved);
    assert_eq!(loaded[0].kind(), WorkoutKind::Running);
    assert_eq!(loaded[0].metric(), 5.2);
    assert_eq!(loaded[0].created_at, test_time());
    assert_eq!(loaded[1].kind(), WorkoutKind::Cycling);
    assert_eq!(loaded[1].intensity(), -120.0);
    assert_eq!(loaded[1].label, "Cycling on April 14");
    assert_eq!(second.list().workout_ids(), vec![saved[0].id, saved[1].id]);
}

#[test]
fn test_stored_layout() {
    let storage = MemoryStore::new();
    let log = new_log();

    let mut tracker = tracker_with(&storage, &log);
    tracker
        .submit(Coordinates::new(1.5, 2.5), WorkoutSubmission::running(4.0, 20.0, 160.0))
        .unwrap();

    let json = storage.get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entry = &value.as_array().unwrap()[0];

    assert_eq!(entry["kind"], "running");
    assert_eq!(entry["coordinates"], serde_json::json!([1.5, 2.5]));
    assert_eq!(entry["distanceKm"], 4.0);
    assert_eq!(entry["durationMin"], 20.0);
    assert_eq!(entry["label"], "Running on April 14");
    assert!(entry["id"].is_string());
}

#[test]
fn test_corrupt_data_leaves_store_empty() {
    let storage = MemoryStore::new();
    let log = new_log();
    storage.set(STORAGE_KEY, "{ not json").unwrap();

    let mut tracker = tracker_with(&storage, &log);
    let result = tracker.rehydrate();

    assert!(matches!(
        result,
        Err(TrackerError::Storage(StorageError::Corrupt(_)))
    ));
    assert!(tracker.store().is_empty());
    assert!(tracker.list().entries.is_empty());
}

#[test]
fn test_rehydrate_replaces_current_entries() {
    let storage = MemoryStore::new();
    let log = new_log();

    let mut tracker = tracker_with(&storage, &log);
    tracker.attach_map(MockMap::new(log.clone()), Coordinates::new(0.0, 0.0));
    tracker
        .submit(Coordinates::new(0.0, 0.0), WorkoutSubmission::running(5.0, 25.0, 170.0))
        .unwrap();

    assert_eq!(tracker.rehydrate(), Ok(1));
    assert_eq!(tracker.store().len(), 1);
    assert_eq!(tracker.map().unwrap().live.len(), 1);
    assert_eq!(tracker.list().entries.len(), 1);
}

#[test]
fn test_file_store_session_round_trip() {
    let temp = TempDir::new().unwrap();
    let log = new_log();
    let open = |log: &CallLog| {
        WorkoutTracker::<MockMap, MockList, FileStore>::new(
            MockList::new(log.clone()),
            FileStore::open(temp.path()).unwrap(),
            Box::new(FixedClock(test_time())),
            MapSettings::default(),
        )
    };

    let id = {
        let mut tracker = open(&log);
        tracker
            .submit(Coordinates::new(35.68, 139.69), WorkoutSubmission::cycling(30.0, 60.0, 210.0))
            .unwrap()
    };
    assert!(temp.path().join("workouts.json").exists());

    let mut tracker = open(&log);
    assert_eq!(tracker.rehydrate(), Ok(1));
    let (record, index) = tracker.find_by_id(&id).unwrap();
    assert_eq!(index, 0);
    assert_eq!(record.metric(), 30.0);

    tracker.clear_all().unwrap();
    assert!(!temp.path().join("workouts.json").exists());
}
