//! Form input validation.
//!
//! Validation policy: every numeric input must be finite; distance and
//! duration must be positive; running cadence must be positive. Cycling
//! elevation gain is only required to be finite, since flat or downhill rides
//! legitimately report zero or negative gain.

use thiserror::Error;

use super::clock::Clock;
use super::types::{Coordinates, WorkoutKind, WorkoutRecord};

/// Form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Distance => write!(f, "distance"),
            Field::Duration => write!(f, "duration"),
            Field::Cadence => write!(f, "cadence"),
            Field::Elevation => write!(f, "elevation gain"),
        }
    }
}

/// Reasons a submission is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must be a number")]
    NotFinite(Field),

    #[error("{0} must be a positive number")]
    NotPositive(Field),
}

/// Raw values submitted from the workout form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSubmission {
    /// Selected workout kind
    pub kind: WorkoutKind,
    /// Distance in km
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Cadence (running) or elevation gain (cycling)
    pub intensity: f64,
}

impl WorkoutSubmission {
    /// Create a running submission.
    pub fn running(distance_km: f64, duration_min: f64, cadence: f64) -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance_km,
            duration_min,
            intensity: cadence,
        }
    }

    /// Create a cycling submission.
    pub fn cycling(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            distance_km,
            duration_min,
            intensity: elevation_gain_m,
        }
    }

    /// Check the submission against the validation policy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let intensity_field = match self.kind {
            WorkoutKind::Running => Field::Cadence,
            WorkoutKind::Cycling => Field::Elevation,
        };

        let fields = [
            (Field::Distance, self.distance_km),
            (Field::Duration, self.duration_min),
            (intensity_field, self.intensity),
        ];

        if let Some((field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ValidationError::NotFinite(*field));
        }

        let must_be_positive = match self.kind {
            WorkoutKind::Running => &fields[..],
            WorkoutKind::Cycling => &fields[..2],
        };

        if let Some((field, _)) = must_be_positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ValidationError::NotPositive(*field));
        }

        Ok(())
    }

    /// Validate and build the record at the given coordinates.
    pub fn into_record(
        self,
        coordinates: Coordinates,
        clock: &dyn Clock,
    ) -> Result<WorkoutRecord, ValidationError> {
        self.validate()?;

        let record = match self.kind {
            WorkoutKind::Running => WorkoutRecord::running(
                coordinates,
                self.distance_km,
                self.duration_min,
                self.intensity,
                clock.now(),
            ),
            WorkoutKind::Cycling => WorkoutRecord::cycling(
                coordinates,
                self.distance_km,
                self.duration_min,
                self.intensity,
                clock.now(),
            ),
        };

        Ok(record)
    }
}

/// Text buffers backing the workout form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    /// Selected kind
    pub kind: WorkoutKind,
    /// Distance text
    pub distance: String,
    /// Duration text
    pub duration: String,
    /// Cadence text (running only)
    pub cadence: String,
    /// Elevation text (cycling only)
    pub elevation: String,
}

impl WorkoutForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert the text buffers to numbers.
    ///
    /// Blank fields read as zero and unparsable text as NaN, so both are
    /// caught by [`WorkoutSubmission::validate`] where they matter.
    pub fn submission(&self) -> WorkoutSubmission {
        let intensity = match self.kind {
            WorkoutKind::Running => &self.cadence,
            WorkoutKind::Cycling => &self.elevation,
        };

        WorkoutSubmission {
            kind: self.kind,
            distance_km: parse_number(&self.distance),
            duration_min: parse_number(&self.duration),
            intensity: parse_number(intensity),
        }
    }

    /// Clear all numeric fields, keeping the selected kind.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }
}

fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse().unwrap_or(f64::NAN)
}
