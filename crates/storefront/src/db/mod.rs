//! JSON collection store.
//!
//! Every collection (`products`, `users`, `orders`, `wishlists`) is one
//! JSON array of records in one file under the data directory. There is no
//! schema enforcement and no migration; readers tolerate missing optional
//! keys.
//!
//! Two disciplines keep the flat files honest:
//!
//! - **Single writer per collection.** Every mutation goes through
//!   [`Collection::with_mut`], which holds an async mutex across the whole
//!   read-modify-write cycle. Concurrent mutations of one collection
//!   serialize instead of losing updates.
//! - **Atomic replace.** [`FsBackend`] writes to a temp file and renames it
//!   over the collection, so a crash mid-save can never leave a
//!   half-written file for the next reader.
//!
//! A missing file is "no data yet" and loads as an empty collection. A file
//! that exists but does not parse is surfaced as
//! [`RepositoryError::Corrupt`] - storage corruption is never silently
//! treated as an empty store.
//!
//! [`MemoryBackend`] implements the same [`StoreBackend`] seam entirely in
//! memory and backs the test suites.

pub mod orders;
pub mod products;
pub mod users;
pub mod wishlists;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;
pub use wishlists::WishlistRepository;

use std::collections::HashMap;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying storage could not be read or written.
    #[error("storage error: {0}")]
    Io(#[from] io::Error),

    /// A collection file exists but is not valid JSON for its record type.
    #[error("corrupt collection `{collection}`: {message}")]
    Corrupt {
        collection: &'static str,
        message: String,
    },

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Raw byte storage for named collections.
///
/// The seam between the typed repositories and the medium holding the
/// data: the filesystem in production, memory in tests.
pub trait StoreBackend: Send + Sync {
    /// Read the raw bytes of a collection. `Ok(None)` means the collection
    /// has never been written.
    fn read(&self, collection: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replace the entire collection.
    fn write(&self, collection: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Filesystem backend: one `<collection>.json` file per collection.
pub struct FsBackend {
    dir: PathBuf,
}

impl FsBackend {
    /// Create a backend rooted at `dir`. The directory is created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }
}

impl StoreBackend for FsBackend {
    fn read(&self, collection: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path(collection)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, collection: &str, bytes: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename keeps the visible file complete at all times
        let tmp = self.dir.join(format!("{collection}.json.tmp"));
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, self.path(collection))
    }
}

/// In-memory backend, the test fake for [`FsBackend`].
#[derive(Default)]
pub struct MemoryBackend {
    collections: StdMutex<HashMap<String, Vec<u8>>>,
}

impl StoreBackend for MemoryBackend {
    fn read(&self, collection: &str) -> io::Result<Option<Vec<u8>>> {
        let collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(collections.get(collection).cloned())
    }

    fn write(&self, collection: &str, bytes: &[u8]) -> io::Result<()> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        collections.insert(collection.to_owned(), bytes.to_vec());
        Ok(())
    }
}

/// Handle to the JSON collection store.
///
/// Cheaply cloneable; clones share the backend and the per-collection
/// write locks.
#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn StoreBackend>,
    locks: Arc<StdMutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl JsonStore {
    /// Open a store over JSON files in `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_backend(Arc::new(FsBackend::new(data_dir)))
    }

    /// Open a store over an in-memory backend (for tests).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::default()))
    }

    /// Open a store over any backend.
    pub fn with_backend(backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            backend,
            locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Typed handle to one named collection. Handles for the same name
    /// share one write lock.
    #[must_use]
    pub fn collection<T>(&self, name: &'static str) -> Collection<T> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(name.to_owned()).or_default())
        };

        Collection {
            name,
            backend: Arc::clone(&self.backend),
            lock,
            _marker: PhantomData,
        }
    }
}

/// Typed access to one collection.
pub struct Collection<T> {
    name: &'static str,
    backend: Arc<dyn StoreBackend>,
    lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            backend: Arc::clone(&self.backend),
            lock: Arc::clone(&self.lock),
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    /// Load all records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read and
    /// `RepositoryError::Corrupt` if it does not parse. A missing file is
    /// not an error: it loads as an empty collection.
    pub fn load(&self) -> Result<Vec<T>, RepositoryError> {
        match self.backend.read(self.name)? {
            None => Ok(Vec::new()),
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Corrupt {
                    collection: self.name,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Run one read-modify-write cycle under the collection's write lock.
    ///
    /// `f` receives the current records and may mutate them; the mutated
    /// records are persisted when `f` returns `Ok`. When `f` returns `Err`
    /// nothing is written, so a rejected mutation never partially applies.
    ///
    /// # Errors
    ///
    /// Propagates load/save failures and whatever `f` returns.
    pub async fn with_mut<R, E, F>(&self, f: F) -> Result<R, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let _guard = self.lock.lock().await;

        let mut records = self.load()?;
        let out = f(&mut records)?;

        let bytes = serde_json::to_vec_pretty(&records)
            .map_err(io::Error::other)
            .map_err(RepositoryError::from)?;
        self.backend
            .write(self.name, &bytes)
            .map_err(RepositoryError::from)?;

        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Record {
        id: i32,
        name: String,
    }

    fn record(id: i32) -> Record {
        Record {
            id,
            name: format!("record-{id}"),
        }
    }

    #[test]
    fn test_missing_collection_loads_empty() {
        let store = JsonStore::in_memory();
        let records = store.collection::<Record>("things").load().unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_with_mut_persists() {
        let store = JsonStore::in_memory();
        let things = store.collection::<Record>("things");

        things
            .with_mut(|records| {
                records.push(record(1));
                Ok::<_, RepositoryError>(())
            })
            .await
            .unwrap();

        // A second handle to the same collection sees the write
        let reloaded = store.collection::<Record>("things").load().unwrap();
        assert_eq!(reloaded, vec![record(1)]);
    }

    #[tokio::test]
    async fn test_with_mut_error_aborts_write() {
        let store = JsonStore::in_memory();
        let things = store.collection::<Record>("things");

        things
            .with_mut(|records| {
                records.push(record(1));
                Ok::<_, RepositoryError>(())
            })
            .await
            .unwrap();

        let result: Result<(), RepositoryError> = things
            .with_mut(|records| {
                records.clear();
                Err(RepositoryError::Conflict("rejected".to_owned()))
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(things.load().unwrap(), vec![record(1)]);
    }

    #[test]
    fn test_corrupt_collection_is_not_empty() {
        let store = JsonStore::in_memory();
        store.backend.write("things", b"{not json").unwrap();

        let result = store.collection::<Record>("things").load();
        assert!(matches!(
            result,
            Err(RepositoryError::Corrupt {
                collection: "things",
                ..
            })
        ));
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let store = JsonStore::in_memory();
        // Valid JSON, wrong record shape
        store.backend.write("things", br#"[{"id":"x"}]"#).unwrap();

        let result = store.collection::<Record>("things").load();
        assert!(matches!(result, Err(RepositoryError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_fs_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path());
        let things = store.collection::<Record>("things");

        things
            .with_mut(|records| {
                records.push(record(7));
                Ok::<_, RepositoryError>(())
            })
            .await
            .unwrap();

        // The collection file exists, the temp file does not linger
        assert!(dir.path().join("things.json").exists());
        assert!(!dir.path().join("things.json.tmp").exists());

        // A store reopened over the same directory sees the data
        let reopened = JsonStore::open(dir.path());
        assert_eq!(
            reopened.collection::<Record>("things").load().unwrap(),
            vec![record(7)]
        );
    }
}
