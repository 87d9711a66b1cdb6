use crate::models::{GenerationParams, Settings};
use serde::{Serialize, de::DeserializeOwned};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

pub const SETTINGS_KEY: &str = "settings";
pub const MAIN_SETTINGS_KEY: &str = "main-settings";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// String key-value storage such as the browser's `localStorage`.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_raw(&self, key: &str, value: String) -> StorageResult<()>;
}

/// In-process store, used wherever no browser storage exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: String) -> StorageResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get_raw(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> StorageResult<()> {
    store.set_raw(key, serde_json::to_string(value)?)
}

/// Stored settings, or `None` when nothing usable is stored.
pub fn load_settings(store: &dyn KeyValueStore) -> Option<Settings> {
    read_json(store, SETTINGS_KEY).unwrap_or_else(|e| {
        tracing::warn!("Ignoring stored settings: {}", e);
        None
    })
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &Settings) -> StorageResult<()> {
    write_json(store, SETTINGS_KEY, settings)
}

pub fn load_params(store: &dyn KeyValueStore) -> Option<GenerationParams> {
    read_json(store, MAIN_SETTINGS_KEY).unwrap_or_else(|e| {
        tracing::warn!("Ignoring stored generation parameters: {}", e);
        None
    })
}

pub fn save_params(store: &dyn KeyValueStore, params: &GenerationParams) -> StorageResult<()> {
    write_json(store, MAIN_SETTINGS_KEY, params)
}
