//! Workout model.
//!
//! Defines the running and cycling records, their derived metrics, and the
//! validation applied to form input before a record is created.

pub mod clock;
pub mod types;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use types::{
    create_cycling, create_running, Coordinates, WorkoutDetails, WorkoutId, WorkoutKind,
    WorkoutRecord,
};
pub use validation::{Field, ValidationError, WorkoutForm, WorkoutSubmission};
