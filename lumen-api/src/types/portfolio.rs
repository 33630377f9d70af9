//! Portfolio-related API types

use lumen_core::PortfolioProject;
use lumen_storage::SyncOutcome;
use serde::{Deserialize, Serialize};

/// Public portfolio listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PortfolioResponse {
    pub projects: Vec<PortfolioProject>,
    pub total: usize,
}

impl From<Vec<PortfolioProject>> for PortfolioResponse {
    fn from(projects: Vec<PortfolioProject>) -> Self {
        Self {
            total: projects.len(),
            projects,
        }
    }
}

/// What the last sync did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Skipped,
    Synced,
    Failed,
}

/// Result of a forced portfolio sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SyncResponse {
    pub status: SyncStatus,
    /// Records written to the cache (zero unless synced)
    pub count: usize,
}

impl From<SyncOutcome> for SyncResponse {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Skipped => Self {
                status: SyncStatus::Skipped,
                count: 0,
            },
            SyncOutcome::Synced { count } => Self {
                status: SyncStatus::Synced,
                count,
            },
            SyncOutcome::Failed => Self {
                status: SyncStatus::Failed,
                count: 0,
            },
        }
    }
}
