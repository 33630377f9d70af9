//! Shared application state for Axum routers.

use std::sync::Arc;

use lumen_core::{Inquiry, LumenResult, Project, Testimonial};
use lumen_storage::{
    EntityRepository, InMemoryKeyedStore, KeyedPortfolioCache, KeyedRepository, KeyedStore,
    LmdbKeyedStore, PortfolioSync, SettingsRepository,
};

use crate::config::{ApiConfig, StoreBackend};

pub type ProjectRepo = Arc<dyn EntityRepository<Project>>;
pub type TestimonialRepo = Arc<dyn EntityRepository<Testimonial>>;
pub type InquiryRepo = Arc<dyn EntityRepository<Inquiry>>;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Raw keyed store, used by the readiness probe.
    pub store: Arc<dyn KeyedStore>,
    pub projects: ProjectRepo,
    pub testimonials: TestimonialRepo,
    pub inquiries: InquiryRepo,
    pub settings: Arc<SettingsRepository>,
    /// Bridge invoked after every project mutation and by the portfolio routes.
    pub portfolio: Arc<PortfolioSync>,
    pub start_time: std::time::Instant,
}

crate::impl_from_ref!(Arc<dyn KeyedStore>, store);
crate::impl_from_ref!(ProjectRepo, projects);
crate::impl_from_ref!(TestimonialRepo, testimonials);
crate::impl_from_ref!(InquiryRepo, inquiries);
crate::impl_from_ref!(Arc<SettingsRepository>, settings);
crate::impl_from_ref!(Arc<PortfolioSync>, portfolio);
crate::impl_from_ref!(std::time::Instant, start_time);

impl AppState {
    /// Wire every repository and the sync bridge over one keyed store.
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        let projects: ProjectRepo = Arc::new(KeyedRepository::<Project>::new(store.clone()));
        let cache = Arc::new(KeyedPortfolioCache::new(store.clone()));
        let portfolio = Arc::new(PortfolioSync::new(projects.clone(), cache));

        Self {
            projects,
            testimonials: Arc::new(KeyedRepository::<Testimonial>::new(store.clone())),
            inquiries: Arc::new(KeyedRepository::<Inquiry>::new(store.clone())),
            settings: Arc::new(SettingsRepository::new(store.clone())),
            portfolio,
            store,
            start_time: std::time::Instant::now(),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryKeyedStore::new()))
    }

    /// Open the store selected by the configuration.
    pub fn from_config(config: &ApiConfig) -> LumenResult<Self> {
        let store: Arc<dyn KeyedStore> = match config.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Arc::new(InMemoryKeyedStore::new())
            }
            StoreBackend::Lmdb => {
                let store = LmdbKeyedStore::open(&config.data_dir, config.store_max_mb)?;
                tracing::info!(path = %config.data_dir.display(), "Opened LMDB store");
                Arc::new(store)
            }
        };
        Ok(Self::new(store))
    }
}
