use crate::{ParamSet, StorageError};

/// The shareable store, typically a page URL's query string.
///
/// Reads and writes always move the whole parameter set; a write replaces
/// everything that was there. This is what makes a primary answer and its
/// cascade land together.
pub trait ParamStore {
    /// Read the current parameters.
    fn read(&self) -> ParamSet;

    /// Replace the parameters.
    fn write(&mut self, params: ParamSet);
}

/// A private per-profile store for sensitive answers.
///
/// Implementations may fail at any time; callers treat a failed read as an
/// empty value and a failed write as a no-op.
pub trait SecureStore {
    /// Read an entry. `Ok(None)` means the entry does not exist.
    fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Create or overwrite an entry.
    fn set(&mut self, name: &str, value: &str) -> Result<(), StorageError>;

    /// Delete an entry. Deleting a missing entry succeeds.
    fn remove(&mut self, name: &str) -> Result<(), StorageError>;
}
