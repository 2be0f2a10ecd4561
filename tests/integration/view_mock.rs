//! Recording map and list views for driving the tracker in tests.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use trailmark::storage::{MapSettings, MemoryStore};
use trailmark::tracker::{BoundingRegion, ListView, MapView, MarkerPopup, WorkoutTracker};
use trailmark::workouts::{Coordinates, FixedClock, WorkoutId, WorkoutRecord};

/// One call made against a mock view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    PlaceMarker(u32, Coordinates, String),
    RemoveMarker(u32),
    CenterOn(Coordinates, u8),
    FitBounds(BoundingRegion, [f32; 2]),
    RenderEntry(u32, WorkoutId),
    RemoveEntry(u32),
    Reset,
}

/// Shared log of view calls in the order they happened.
pub type CallLog = Rc<RefCell<Vec<ViewCall>>>;

/// Map that records every call and hands out sequential marker handles.
#[derive(Debug)]
pub struct MockMap {
    log: CallLog,
    next: u32,
    pub live: Vec<u32>,
}

impl MockMap {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            next: 0,
            live: Vec::new(),
        }
    }
}

impl MapView for MockMap {
    type Marker = u32;

    fn place_marker(&mut self, coordinates: Coordinates, popup: &MarkerPopup) -> u32 {
        self.next += 1;
        self.live.push(self.next);
        self.log
            .borrow_mut()
            .push(ViewCall::PlaceMarker(self.next, coordinates, popup.text.clone()));
        self.next
    }

    fn remove_marker(&mut self, marker: u32) {
        self.live.retain(|m| *m != marker);
        self.log.borrow_mut().push(ViewCall::RemoveMarker(marker));
    }

    fn center_on(&mut self, coordinates: Coordinates, zoom: u8) {
        self.log.borrow_mut().push(ViewCall::CenterOn(coordinates, zoom));
    }

    fn fit_bounds(&mut self, region: BoundingRegion, padding: [f32; 2]) {
        self.log.borrow_mut().push(ViewCall::FitBounds(region, padding));
    }
}

/// List that records every call.
#[derive(Debug)]
pub struct MockList {
    log: CallLog,
    next: u32,
    pub entries: Vec<(u32, WorkoutId)>,
}

impl MockList {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            next: 0,
            entries: Vec::new(),
        }
    }

    /// Workouts in render order; the top of the list is the last one.
    pub fn workout_ids(&self) -> Vec<WorkoutId> {
        self.entries.iter().map(|(_, id)| *id).collect()
    }
}

impl ListView for MockList {
    type Element = u32;

    fn render_entry(&mut self, record: &WorkoutRecord) -> u32 {
        self.next += 1;
        self.entries.push((self.next, record.id));
        self.log
            .borrow_mut()
            .push(ViewCall::RenderEntry(self.next, record.id));
        self.next
    }

    fn remove_entry(&mut self, element: u32) {
        self.entries.retain(|(e, _)| *e != element);
        self.log.borrow_mut().push(ViewCall::RemoveEntry(element));
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.log.borrow_mut().push(ViewCall::Reset);
    }
}

pub type MockTracker<'a> = WorkoutTracker<MockMap, MockList, &'a MemoryStore>;

/// Fixed creation time used by every test tracker.
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 14, 8, 15, 0).unwrap()
}

/// Tracker over `storage` with a recording list and no map yet.
pub fn tracker_with<'a>(storage: &'a MemoryStore, log: &CallLog) -> MockTracker<'a> {
    WorkoutTracker::new(
        MockList::new(log.clone()),
        storage,
        Box::new(FixedClock(test_time())),
        MapSettings::default(),
    )
}
