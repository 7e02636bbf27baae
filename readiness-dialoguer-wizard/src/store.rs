//! File-backed stores, so an assessment survives between runs.
//!
//! The shareable state is a single line holding the query string. Sensitive
//! answers sit in a separate JSON object that is never part of a share link.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use readiness::{ParamSet, ParamStore, SecureStore, StorageError, storage};

/// Query string persisted to a file.
#[derive(Debug)]
pub struct FileParamStore {
    path: PathBuf,
    params: ParamSet,
}

impl FileParamStore {
    /// Open the store at `path`. A missing file is an empty assessment.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let params = match fs::read_to_string(&path) {
            Ok(text) => storage::parse_query(text.trim()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => ParamSet::new(),
            Err(err) => return Err(StorageError::backend(err)),
        };
        tracing::debug!(path = %path.display(), params = params.len(), "opened state");
        Ok(Self { path, params })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current query string.
    pub fn query(&self) -> String {
        storage::to_query(&self.params)
    }

    fn persist(&self) -> io::Result<()> {
        fs::write(&self.path, format!("{}\n", self.query()))
    }
}

impl ParamStore for FileParamStore {
    fn read(&self) -> ParamSet {
        self.params.clone()
    }

    fn write(&mut self, params: ParamSet) {
        self.params = params;
        if let Err(err) = self.persist() {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to save state");
        }
    }
}

/// Sensitive entries persisted as a JSON object.
///
/// A file that cannot be read or parsed makes the store unavailable for the
/// whole run rather than being overwritten.
#[derive(Debug)]
pub struct FileSecureStore {
    path: PathBuf,
    entries: Option<BTreeMap<String, String>>,
}

impl FileSecureStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load(&path) {
            Ok(entries) => Some(entries),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "secure store unavailable");
                None
            }
        };
        Self { path, entries }
    }

    pub fn is_available(&self) -> bool {
        self.entries.is_some()
    }

    fn entries_mut(&mut self) -> Result<&mut BTreeMap<String, String>, StorageError> {
        self.entries.as_mut().ok_or(StorageError::Unavailable)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let entries = self.entries.as_ref().ok_or(StorageError::Unavailable)?;
        let json = serde_json::to_string_pretty(entries).map_err(StorageError::backend)?;
        fs::write(&self.path, json).map_err(StorageError::backend)
    }
}

fn load(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    match fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(err.into()),
    }
}

impl SecureStore for FileSecureStore {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.as_ref().ok_or(StorageError::Unavailable)?;
        Ok(entries.get(name).cloned())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), StorageError> {
        self.entries_mut()?
            .insert(name.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, name: &str) -> Result<(), StorageError> {
        if self.entries_mut()?.remove(name).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let params = FileParamStore::open(dir.path().join("state")).unwrap();
        assert!(params.read().is_empty());

        let secure = FileSecureStore::open(dir.path().join("secure.json"));
        assert!(secure.is_available());
        assert_eq!(secure.get("secure_app_name").unwrap(), None);
    }

    #[test]
    fn params_persist_as_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");

        let mut store = FileParamStore::open(&path).unwrap();
        store.write(ParamSet::new().with("dr_plan", "1").with("role", "sre"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "dr_plan=1&role=sre\n");

        let reopened = FileParamStore::open(&path).unwrap();
        assert_eq!(reopened.read().get("role"), Some("sre"));
    }

    #[test]
    fn secure_entries_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secure.json");

        let mut store = FileSecureStore::open(&path);
        store.set("secure_nar_id", "NAR-1").unwrap();
        store.set("secure_app_name", "Ledger").unwrap();
        store.remove("secure_app_name").unwrap();
        store.remove("never_set").unwrap();

        let reopened = FileSecureStore::open(&path);
        assert_eq!(reopened.get("secure_nar_id").unwrap().as_deref(), Some("NAR-1"));
        assert_eq!(reopened.get("secure_app_name").unwrap(), None);
    }

    #[test]
    fn corrupt_secure_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secure.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FileSecureStore::open(&path);
        assert!(!store.is_available());
        assert!(store.get("secure_nar_id").unwrap_err().is_unavailable());
        assert!(store.set("secure_nar_id", "NAR-1").unwrap_err().is_unavailable());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
