//! Key-value persistence
//!
//! The game stores a handful of text values under string keys:
//! - LocalStorage on the web
//! - An in-memory map for native runs and tests

use std::collections::HashMap;
use std::fmt;

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Failure to write a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend refused the write (quota, private mode, ...)
    WriteRejected(String),
    /// No backing storage available
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::WriteRejected(reason) => write!(f, "storage rejected write: {reason}"),
            StoreError::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StoreError {}

/// String key-value storage
pub trait KeyValueStore: fmt::Debug {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.items.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("k"), None);
        store.set_item("k", "1").unwrap();
        store.set_item("k", "2").unwrap();
        assert_eq!(store.get_item("k").as_deref(), Some("2"));
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(StoreError::Unavailable.to_string(), "storage unavailable");
        assert_eq!(
            StoreError::WriteRejected("QuotaExceededError".into()).to_string(),
            "storage rejected write: QuotaExceededError"
        );
    }
}
