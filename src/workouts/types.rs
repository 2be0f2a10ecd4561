//! Workout record types.
//!
//! A record stores every derived value (pace or speed, label) next to the raw
//! inputs, so a record read back from storage is indistinguishable from one
//! that was just created.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::Clock;

/// Month names used when building record labels.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Unique identifier of a workout record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(Uuid);

impl WorkoutId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorkoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic position in decimal degrees.
///
/// Serialized as a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.lat, coords.lon]
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// Kind of workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    #[default]
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase name as stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Icon shown on markers and cards.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃",
            WorkoutKind::Cycling => "🚴",
        }
    }

    /// Unit of the derived performance metric.
    pub fn metric_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "min/km",
            WorkoutKind::Cycling => "km/h",
        }
    }

    /// Unit of the kind-specific intensity field.
    pub fn intensity_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "spm",
            WorkoutKind::Cycling => "m",
        }
    }
}

impl std::fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "Running"),
            WorkoutKind::Cycling => write!(f, "Cycling"),
        }
    }
}

/// Kind-specific fields of a workout, tagged by `kind` on disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutDetails {
    #[serde(rename_all = "camelCase")]
    Running {
        /// Cadence in steps per minute
        cadence_steps_per_min: f64,
        /// Pace in minutes per kilometer
        pace_min_per_km: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        /// Elevation gain in meters (may be zero or negative)
        elevation_gain_m: f64,
        /// Average speed in km/h
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    /// Kind of these details.
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A single logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Unique identifier
    pub id: WorkoutId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Where the workout happened
    pub coordinates: Coordinates,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Kind-specific inputs and derived metric
    #[serde(flatten)]
    pub details: WorkoutDetails,
    /// Human-readable label, e.g. "Running on April 14"
    pub label: String,
}

impl WorkoutRecord {
    /// Create a running record.
    ///
    /// No validation happens here: zero or non-finite inputs produce a
    /// non-finite pace. Callers validate through
    /// [`WorkoutSubmission`](super::validation::WorkoutSubmission).
    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_steps_per_min: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let details = WorkoutDetails::Running {
            cadence_steps_per_min,
            pace_min_per_km: pace_min_per_km(distance_km, duration_min),
        };
        Self::with_details(coordinates, distance_km, duration_min, details, created_at)
    }

    /// Create a cycling record. Same pass-through contract as [`Self::running`].
    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let details = WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h: speed_km_per_h(distance_km, duration_min),
        };
        Self::with_details(coordinates, distance_km, duration_min, details, created_at)
    }

    fn with_details(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: WorkoutId::new(),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            label: describe(details.kind(), &created_at),
            details,
        }
    }

    /// Kind of this workout.
    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Cached pace or speed, whichever applies to the kind.
    pub fn metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            WorkoutDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }

    /// Cadence or elevation gain, whichever applies to the kind.
    pub fn intensity(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running {
                cadence_steps_per_min,
                ..
            } => cadence_steps_per_min,
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => elevation_gain_m,
        }
    }

    /// Text shown in the marker popup.
    pub fn popup_text(&self) -> String {
        format!("{} {}", self.kind().icon(), self.label)
    }
}

/// Create a running record stamped by the given clock.
pub fn create_running(
    clock: &dyn Clock,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_steps_per_min: f64,
) -> WorkoutRecord {
    WorkoutRecord::running(
        coordinates,
        distance_km,
        duration_min,
        cadence_steps_per_min,
        clock.now(),
    )
}

/// Create a cycling record stamped by the given clock.
pub fn create_cycling(
    clock: &dyn Clock,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
) -> WorkoutRecord {
    WorkoutRecord::cycling(
        coordinates,
        distance_km,
        duration_min,
        elevation_gain_m,
        clock.now(),
    )
}

/// Pace in min/km.
pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Speed in km/h.
pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// Build a label such as "Cycling on March 3".
pub fn describe(kind: WorkoutKind, created_at: &DateTime<Utc>) -> String {
    let month = MONTHS[created_at.month0() as usize];
    format!("{} on {} {}", kind, month, created_at.day())
}
