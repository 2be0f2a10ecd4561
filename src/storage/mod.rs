//! Storage module for persisted state and configuration.

pub mod config;
pub mod kv;

pub use config::{AppConfig, ConfigError, MapSettings, StorageSettings, UiSettings};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
