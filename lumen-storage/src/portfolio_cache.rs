//! Denormalized portfolio cache.

use std::sync::Arc;

use lumen_core::{LumenResult, PortfolioProject};

use crate::keyed::{decode_or_default, encode, KeyedStore, StoreKey};

/// Storage for the projected portfolio collection.
pub trait PortfolioCache: Send + Sync {
    /// Cached projects, empty when nothing was ever written.
    fn read(&self) -> LumenResult<Vec<PortfolioProject>>;

    /// Overwrite the whole cache in one write.
    fn replace(&self, projects: &[PortfolioProject]) -> LumenResult<()>;
}

/// Portfolio cache kept under its own store key.
pub struct KeyedPortfolioCache {
    store: Arc<dyn KeyedStore>,
}

impl KeyedPortfolioCache {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }
}

impl PortfolioCache for KeyedPortfolioCache {
    fn read(&self) -> LumenResult<Vec<PortfolioProject>> {
        let bytes = self.store.get(StoreKey::PortfolioCache)?;
        Ok(decode_or_default(StoreKey::PortfolioCache, bytes))
    }

    fn replace(&self, projects: &[PortfolioProject]) -> LumenResult<()> {
        let bytes = encode(StoreKey::PortfolioCache, projects)?;
        self.store.set(StoreKey::PortfolioCache, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyed::InMemoryKeyedStore;
    use lumen_core::builtin_portfolio;

    #[test]
    fn test_empty_cache_reads_empty() -> LumenResult<()> {
        let cache = KeyedPortfolioCache::new(Arc::new(InMemoryKeyedStore::new()));
        assert!(cache.read()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_replace_overwrites() -> LumenResult<()> {
        let store = Arc::new(InMemoryKeyedStore::new());
        let cache = KeyedPortfolioCache::new(store.clone());
        let builtin = builtin_portfolio();

        cache.replace(&builtin)?;
        assert_eq!(cache.read()?, builtin);

        cache.replace(&builtin[..1])?;
        assert_eq!(cache.read()?.len(), 1);
        assert!(store.get(StoreKey::Projects)?.is_none());
        Ok(())
    }
}
