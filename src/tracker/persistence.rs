//! JSON encoding of the persisted workout list.

use crate::storage::{KeyValueStore, StorageError};
use crate::workouts::WorkoutRecord;

/// Storage key holding the workout list.
pub const STORAGE_KEY: &str = "workouts";

/// Encode records as a JSON array.
pub fn encode_records<'a, I>(records: I) -> Result<String, StorageError>
where
    I: IntoIterator<Item = &'a WorkoutRecord>,
{
    let records: Vec<&WorkoutRecord> = records.into_iter().collect();
    serde_json::to_string(&records).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Decode a JSON array of records. A literal `null` decodes as no records.
pub fn decode_records(json: &str) -> Result<Vec<WorkoutRecord>, StorageError> {
    let records: Option<Vec<WorkoutRecord>> =
        serde_json::from_str(json).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    Ok(records.unwrap_or_default())
}

/// Write records under [`STORAGE_KEY`].
pub fn save_records<'a, S, I>(storage: &S, records: I) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    I: IntoIterator<Item = &'a WorkoutRecord>,
{
    let json = encode_records(records)?;
    storage.set(STORAGE_KEY, &json)
}

/// Read records from [`STORAGE_KEY`]; a missing key yields no records.
pub fn load_records<S>(storage: &S) -> Result<Vec<WorkoutRecord>, StorageError>
where
    S: KeyValueStore + ?Sized,
{
    match storage.get(STORAGE_KEY)? {
        Some(json) => decode_records(&json),
        None => Ok(Vec::new()),
    }
}
