//! Current-position lookup.
//!
//! The position is requested once per launch on a worker thread and delivered
//! to the UI thread over a channel. There is no retry.

use crossbeam::channel::{bounded, Receiver};
use thiserror::Error;

use crate::workouts::Coordinates;

/// Environment variable holding a `lat,lon` position override.
pub const POSITION_ENV_VAR: &str = "TRAILMARK_POSITION";

/// Source of the device position.
pub trait LocationProvider: Send + 'static {
    /// Look up the current position.
    fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Outcome of a position request.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// Position acquired
    Acquired(Coordinates),
    /// Position could not be determined
    Failed(LocationError),
}

/// Position taken from the environment or configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    position: Option<Coordinates>,
}

impl ConfiguredLocation {
    /// Use a fixed position, or none.
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    /// Prefer [`POSITION_ENV_VAR`], falling back to `configured`.
    pub fn from_env_or(configured: Option<Coordinates>) -> Self {
        let from_env = std::env::var(POSITION_ENV_VAR)
            .ok()
            .and_then(|value| match parse_position(&value) {
                Ok(position) => Some(position),
                Err(e) => {
                    tracing::warn!("Ignoring {}: {}", POSITION_ENV_VAR, e);
                    None
                }
            });

        Self::new(from_env.or(configured))
    }
}

impl LocationProvider for ConfiguredLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.ok_or(LocationError::Unavailable)
    }
}

/// Parse a `lat,lon` pair.
pub fn parse_position(text: &str) -> Result<Coordinates, LocationError> {
    let invalid = || LocationError::InvalidPosition(text.to_string());

    let (lat, lon) = text.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(invalid());
    }

    Ok(Coordinates::new(lat, lon))
}

/// Request the position on a worker thread.
///
/// The returned receiver yields exactly one [`LocationEvent`].
pub fn request_position<P: LocationProvider>(provider: P) -> Receiver<LocationEvent> {
    let (tx, rx) = bounded(1);

    std::thread::spawn(move || {
        let event = match provider.current_position() {
            Ok(position) => {
                tracing::info!("Position acquired: {}", position);
                LocationEvent::Acquired(position)
            }
            Err(e) => {
                tracing::warn!("Could not get location: {}", e);
                LocationEvent::Failed(e)
            }
        };
        let _ = tx.send(event);
    });

    rx
}

/// Location errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Position unavailable")]
    Unavailable,

    #[error("Invalid position: {0:?}")]
    InvalidPosition(String),
}
