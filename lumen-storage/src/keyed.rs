//! Keyed store abstraction
//!
//! Every collection lives under one fixed key as a single serialized value.
//! Keys form a closed set so no caller can invent a stringly-typed key.

use lumen_core::{LumenResult, StorageError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// The fixed set of keys the site data lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Canonical, admin-owned projects.
    Projects,
    /// Denormalized projects read by the public portfolio.
    PortfolioCache,
    Testimonials,
    Inquiries,
    Settings,
}

impl StoreKey {
    pub const ALL: [StoreKey; 5] = [
        StoreKey::Projects,
        StoreKey::PortfolioCache,
        StoreKey::Testimonials,
        StoreKey::Inquiries,
        StoreKey::Settings,
    ];

    /// Key as persisted by the backends.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Projects => "admin_projects",
            StoreKey::PortfolioCache => "portfolio_projects",
            StoreKey::Testimonials => "admin_testimonials",
            StoreKey::Inquiries => "admin_inquiries",
            StoreKey::Settings => "site_settings",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous key-value persistence.
///
/// `set` replaces the whole value in one write; backends must never expose a
/// partially written value to `get`.
pub trait KeyedStore: Send + Sync {
    fn get(&self, key: StoreKey) -> LumenResult<Option<Vec<u8>>>;

    fn set(&self, key: StoreKey, value: &[u8]) -> LumenResult<()>;
}

/// Decode a stored value, falling back to the default when the value is
/// missing or malformed.
pub(crate) fn decode_or_default<T>(key: StoreKey, bytes: Option<Vec<u8>>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(bytes) = bytes else {
        return T::default();
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Malformed stored value, using default");
            T::default()
        }
    }
}

/// Decode a stored value, failing when it is present but malformed.
///
/// Mutations go through this so a value that cannot be read is never
/// overwritten with a partial rewrite.
pub(crate) fn decode_strict<T>(key: StoreKey, bytes: Option<Vec<u8>>) -> LumenResult<T>
where
    T: DeserializeOwned + Default,
{
    let Some(bytes) = bytes else {
        return Ok(T::default());
    };
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(key = %key, error = %e, "Refusing to rewrite malformed stored value");
        StorageError::Serialization {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

pub(crate) fn encode<T: serde::Serialize + ?Sized>(key: StoreKey, value: &T) -> LumenResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        StorageError::Serialization {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

/// Process-local store used by tests and `LUMEN_STORE=memory`.
#[derive(Debug, Default)]
pub struct InMemoryKeyedStore {
    values: RwLock<HashMap<StoreKey, Vec<u8>>>,
}

impl InMemoryKeyedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyedStore for InMemoryKeyedStore {
    fn get(&self, key: StoreKey) -> LumenResult<Option<Vec<u8>>> {
        let values = self.values.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: &[u8]) -> LumenResult<()> {
        let mut values = self.values.write().map_err(|_| StorageError::LockPoisoned)?;
        values.insert(key, value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_store_keys_are_distinct() {
        let names: HashSet<_> = StoreKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), StoreKey::ALL.len());
    }

    #[test]
    fn test_in_memory_get_set() -> LumenResult<()> {
        let store = InMemoryKeyedStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(StoreKey::Projects)?, None);

        store.set(StoreKey::Projects, b"[1]")?;
        store.set(StoreKey::Projects, b"[2]")?;
        assert_eq!(store.get(StoreKey::Projects)?, Some(b"[2]".to_vec()));
        assert_eq!(store.get(StoreKey::PortfolioCache)?, None);
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn test_decode_or_default() {
        let value: Vec<u32> = decode_or_default(StoreKey::Projects, Some(b"[1,2]".to_vec()));
        assert_eq!(value, vec![1, 2]);

        let value: Vec<u32> = decode_or_default(StoreKey::Projects, Some(b"{not json".to_vec()));
        assert!(value.is_empty());

        let value: Vec<u32> = decode_or_default(StoreKey::Projects, None);
        assert!(value.is_empty());
    }
}
