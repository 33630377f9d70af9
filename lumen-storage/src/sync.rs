//! Admin-to-portfolio synchronization bridge.
//!
//! One-way: canonical projects are re-read in full, re-projected, and written
//! over the portfolio cache in a single put. The bridge never merges with the
//! previous cache and never patches individual records.

use std::sync::{Arc, Mutex};

use lumen_core::{builtin_portfolio, LumenResult, PortfolioProject, Project};
use serde::Serialize;

use crate::portfolio_cache::PortfolioCache;
use crate::repository::EntityRepository;

/// What a call to [`PortfolioSync::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SyncOutcome {
    /// Canonical collection was empty; cache left untouched.
    Skipped,
    /// Cache replaced with `count` projected records.
    Synced { count: usize },
    /// Read, transform or write failed; previous cache left intact.
    Failed,
}

/// Projects canonical projects into the public portfolio cache.
pub struct PortfolioSync {
    projects: Arc<dyn EntityRepository<Project>>,
    cache: Arc<dyn PortfolioCache>,
    // Held across read-project-write so concurrent syncs never interleave.
    in_flight: Mutex<()>,
}

impl PortfolioSync {
    pub fn new(projects: Arc<dyn EntityRepository<Project>>, cache: Arc<dyn PortfolioCache>) -> Self {
        Self {
            projects,
            cache,
            in_flight: Mutex::new(()),
        }
    }

    /// Regenerate the portfolio cache from the canonical projects.
    ///
    /// Never fails: errors are logged and reported as [`SyncOutcome::Failed`].
    pub fn sync(&self) -> SyncOutcome {
        let _guard = match self.in_flight.lock() {
            Ok(guard) => guard,
            // A panicked sync never wrote a partial cache, so the lock is still usable.
            Err(poisoned) => poisoned.into_inner(),
        };

        match self.sync_locked() {
            Ok(outcome) => {
                match outcome {
                    SyncOutcome::Synced { count } => {
                        tracing::info!(count, "Portfolio cache synchronized")
                    }
                    _ => tracing::debug!("No canonical projects, portfolio cache untouched"),
                }
                outcome
            }
            Err(e) => {
                tracing::error!(error = %e, "Portfolio sync failed");
                SyncOutcome::Failed
            }
        }
    }

    fn sync_locked(&self) -> LumenResult<SyncOutcome> {
        let projects = self.projects.list()?;
        if projects.is_empty() {
            return Ok(SyncOutcome::Skipped);
        }

        let projected: Vec<PortfolioProject> =
            projects.iter().map(PortfolioProject::from_project).collect();
        self.cache.replace(&projected)?;

        Ok(SyncOutcome::Synced {
            count: projected.len(),
        })
    }

    /// Portfolio as served to the public pages.
    ///
    /// Reads the cache; an empty cache triggers one sync and a re-read. When
    /// that still yields nothing the built-in showcase is returned.
    pub fn projected(&self) -> Vec<PortfolioProject> {
        let cached = self.read_cache();
        if !cached.is_empty() {
            return cached;
        }

        self.sync();

        let cached = self.read_cache();
        if !cached.is_empty() {
            return cached;
        }

        tracing::debug!("Portfolio cache empty, serving built-in examples");
        builtin_portfolio()
    }

    /// One projected project by its public id.
    pub fn find(&self, id: &str) -> Option<PortfolioProject> {
        self.projected().into_iter().find(|p| p.id == id)
    }

    fn read_cache(&self) -> Vec<PortfolioProject> {
        match self.cache.read() {
            Ok(projects) => projects,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read portfolio cache");
                Vec::new()
            }
        }
    }
}
