//! LUMEN Storage - Keyed Store, Repositories and Portfolio Sync
//!
//! Persistence is a small keyed store: each collection is one serialized
//! value under a fixed [`StoreKey`]. Repositories hide the keys and give the
//! API typed CRUD. The [`PortfolioSync`] bridge keeps the public portfolio
//! cache in step with the canonical projects.

pub mod keyed;
pub mod lmdb_store;
pub mod portfolio_cache;
pub mod repository;
pub mod sync;

pub use keyed::{InMemoryKeyedStore, KeyedStore, StoreKey};
pub use lmdb_store::{LmdbKeyedStore, LmdbStoreError};
pub use portfolio_cache::{KeyedPortfolioCache, PortfolioCache};
pub use repository::{CollectionEntity, EntityRepository, KeyedRepository, SettingsRepository};
pub use sync::{PortfolioSync, SyncOutcome};
