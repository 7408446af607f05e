//! Store registry: resolves store names to shared `SQLite` connections.
//!
//! Every distinct store name maps to exactly one handle for the life of the
//! registry, so all batches against one store funnel through one connection
//! and see each other's committed work immediately.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use tracing::debug;

use crate::error::BridgeError;

/// Applied once per store, at open time.
const OPEN_PRAGMAS: &str = "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;";

/// A shared, lockable connection to one named store.
///
/// Cloning is cheap and shares the underlying connection. Batch execution
/// holds the lock for a whole batch, so concurrent batches against the same
/// store serialize instead of interleaving on driver state.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    conn: Arc<Mutex<Connection>>,
}

impl StoreHandle {
    fn open(path: &Path) -> Result<Self, BridgeError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(OPEN_PRAGMAS)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lock the store for exclusive use.
    ///
    /// Recovers from poisoning: a panicked batch leaves the connection in a
    /// defined state, so the next batch may keep going.
    #[must_use]
    pub fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Whether two handles share one underlying connection.
    #[must_use]
    pub fn shares_connection_with(&self, other: &StoreHandle) -> bool {
        Arc::ptr_eq(&self.conn, &other.conn)
    }
}

/// Map of store name to open handle, lazily populated.
///
/// The embedder owns one registry per store root; the one-handle-per-name
/// invariant is scoped to the registry.
#[derive(Debug)]
pub struct StoreRegistry {
    root: PathBuf,
    stores: Mutex<HashMap<String, StoreHandle>>,
}

impl StoreRegistry {
    /// Create a registry whose store files live under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// The directory store files resolve under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a store name maps to: `<root>/<name>.db`.
    #[must_use]
    pub fn store_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.db"))
    }

    /// Resolve a store name to its shared handle, opening the store file on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::RequestMalformed` for names that cannot map to a
    /// single file under the root, and `BridgeError::Sqlite` if opening the
    /// database fails.
    pub fn resolve(&self, name: &str) -> Result<StoreHandle, BridgeError> {
        validate_store_name(name)?;
        let mut stores = self
            .stores
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(handle) = stores.get(name) {
            return Ok(handle.clone());
        }

        let path = self.store_path(name);
        debug!(store = name, path = %path.display(), "opening store");
        let handle = StoreHandle::open(&path)?;
        stores.insert(name.to_owned(), handle.clone());
        Ok(handle)
    }
}

// A store name must name exactly one file directly under the root.
fn validate_store_name(name: &str) -> Result<(), BridgeError> {
    if name.is_empty() {
        return Err(BridgeError::RequestMalformed(
            "store name is empty".to_owned(),
        ));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(BridgeError::RequestMalformed(format!(
            "store name {name:?} must not contain path separators"
        )));
    }
    Ok(())
}
