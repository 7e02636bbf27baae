//! In-memory stores for running a session without a browser or a disk.
//!
//! # Example
//!
//! ```rust
//! use readiness::{MemoryParamStore, MemorySecureStore, ReadinessConfig, Session};
//! use readiness::{Practice, TriState};
//!
//! let mut session = Session::new(
//!     MemoryParamStore::from_query("dr_plan=1"),
//!     MemorySecureStore::new().with_entry("secure_app_name", "Ledger"),
//!     ReadinessConfig::default(),
//! );
//! session.set(Practice::DrTested, TriState::No);
//!
//! let answers = session.answers();
//! assert_eq!(answers.tri(Practice::DrPlan), Some(TriState::Yes));
//! assert_eq!(answers.text(readiness::MetaField::AppName), "Ledger");
//! ```

use std::collections::HashMap;

use readiness_types::{ParamSet, ParamStore, SecureStore, StorageError};

use crate::storage;

/// A query string held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryParamStore {
    params: ParamSet,
    writes: usize,
}

impl MemoryParamStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing query string.
    pub fn from_query(query: &str) -> Self {
        Self {
            params: storage::parse_query(query),
            writes: 0,
        }
    }

    /// The current query string.
    pub fn query(&self) -> String {
        storage::to_query(&self.params)
    }

    /// Number of writes received so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ParamStore for MemoryParamStore {
    fn read(&self) -> ParamSet {
        self.params.clone()
    }

    fn write(&mut self, params: ParamSet) {
        self.params = params;
        self.writes += 1;
    }
}

/// A secure store held in memory, optionally simulating an unusable store.
#[derive(Debug, Clone, Default)]
pub struct MemorySecureStore {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemorySecureStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails.
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            unavailable: true,
        }
    }

    /// Add an entry, builder-style.
    pub fn with_entry(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Peek at an entry regardless of availability.
    pub fn entry(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl SecureStore for MemorySecureStore {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.get(name).cloned())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_store_replaces_on_write() {
        let mut store = MemoryParamStore::from_query("a=1&b=2");
        store.write(ParamSet::new().with("c", "3"));
        assert_eq!(store.query(), "c=3");
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn secure_store_operations() {
        let mut store = MemorySecureStore::new();
        store.set("secure_role", "sre").unwrap();
        assert_eq!(store.get("secure_role").unwrap(), Some("sre".to_string()));
        store.remove("secure_role").unwrap();
        store.remove("secure_role").unwrap();
        assert_eq!(store.get("secure_role").unwrap(), None);
    }

    #[test]
    fn unavailable_store_fails_everything() {
        let mut store = MemorySecureStore::unavailable();
        assert!(store.get("x").unwrap_err().is_unavailable());
        assert!(store.set("x", "y").is_err());
        assert!(store.remove("x").is_err());
        assert!(store.is_empty());
    }
}
