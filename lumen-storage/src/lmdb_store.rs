//! LMDB-backed keyed store.
//!
//! Uses the heed crate (Rust bindings for LMDB). Each `set` runs in its own
//! write transaction, so readers see either the previous or the new value.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use lumen_core::LumenResult;

use crate::keyed::{KeyedStore, StoreKey};

/// Error type for LMDB store operations.
#[derive(Debug, thiserror::Error)]
pub enum LmdbStoreError {
    /// Failed to open or create the LMDB environment.
    #[error("Failed to open LMDB environment: {0}")]
    EnvOpen(String),

    /// Failed to open the database within the environment.
    #[error("Failed to open database: {0}")]
    DbOpen(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LmdbStoreError> for lumen_core::LumenError {
    fn from(e: LmdbStoreError) -> Self {
        lumen_core::LumenError::Storage(lumen_core::StorageError::TransactionFailed {
            reason: e.to_string(),
        })
    }
}

/// Persistent keyed store on a single unnamed LMDB database.
pub struct LmdbKeyedStore {
    env: Env,
    db: Database<Bytes, Bytes>,
}

impl LmdbKeyedStore {
    /// Open (or create) a store under `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory where LMDB files will be stored
    /// * `max_size_mb` - Maximum size of the database in megabytes
    pub fn open<P: AsRef<Path>>(path: P, max_size_mb: usize) -> Result<Self, LmdbStoreError> {
        std::fs::create_dir_all(&path)?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(max_size_mb * 1024 * 1024)
                .max_dbs(1)
                .open(path.as_ref())
        }
        .map_err(|e| LmdbStoreError::EnvOpen(e.to_string()))?;

        let mut wtxn = env
            .write_txn()
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        let db: Database<Bytes, Bytes> = env
            .create_database(&mut wtxn, None)
            .map_err(|e| LmdbStoreError::DbOpen(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), max_size_mb, "Opened LMDB store");

        Ok(Self { env, db })
    }
}

impl KeyedStore for LmdbKeyedStore {
    fn get(&self, key: StoreKey) -> LumenResult<Option<Vec<u8>>> {
        let rtxn = self
            .env
            .read_txn()
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        let value = self
            .db
            .get(&rtxn, key.as_str().as_bytes())
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        Ok(value.map(|bytes| bytes.to_vec()))
    }

    fn set(&self, key: StoreKey, value: &[u8]) -> LumenResult<()> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        self.db
            .put(&mut wtxn, key.as_str().as_bytes(), value)
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (LmdbKeyedStore, TempDir) {
        let temp_dir = TempDir::new().expect("TempDir creation should succeed");
        let store = LmdbKeyedStore::open(temp_dir.path(), 10).expect("store creation should succeed");
        (store, temp_dir)
    }

    #[test]
    fn test_missing_key_returns_none() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get(StoreKey::Projects).expect("get"), None);
    }

    #[test]
    fn test_set_then_get() {
        let (store, _dir) = create_test_store();
        store.set(StoreKey::Settings, b"{\"a\":1}").expect("set");
        store.set(StoreKey::Projects, b"[]").expect("set");
        assert_eq!(
            store.get(StoreKey::Settings).expect("get"),
            Some(b"{\"a\":1}".to_vec())
        );
        assert_eq!(store.get(StoreKey::Projects).expect("get"), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().expect("TempDir creation should succeed");
        {
            let store = LmdbKeyedStore::open(temp_dir.path(), 10).expect("open");
            store.set(StoreKey::PortfolioCache, b"[\"x\"]").expect("set");
        }
        let store = LmdbKeyedStore::open(temp_dir.path(), 10).expect("reopen");
        assert_eq!(
            store.get(StoreKey::PortfolioCache).expect("get"),
            Some(b"[\"x\"]".to_vec())
        );
    }
}
