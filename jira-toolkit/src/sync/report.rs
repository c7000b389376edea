//! Due-date sync results.

use chrono::NaiveDate;
use serde::Serialize;

/// Result of updating one related issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    /// Due date was set.
    Updated,

    /// The update was rejected.
    Failed {
        /// Error message.
        error: String,
    },
}

/// One related issue that was missing a due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetUpdate {
    /// Key of the related issue.
    pub key: String,

    /// Update status.
    pub status: UpdateStatus,
}

/// Per-target results of a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Due date copied from the source.
    pub due_date: NaiveDate,

    /// One entry per stale target, in link order.
    pub updates: Vec<TargetUpdate>,
}

impl SyncReport {
    /// Number of successful updates.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.updates
            .iter()
            .filter(|u| u.status == UpdateStatus::Updated)
            .count()
    }

    /// Number of rejected updates.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.updates.len() - self.updated()
    }
}

/// Non-error result of a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The source has no due date.
    NothingToSync,

    /// Stale targets were processed (possibly none).
    Synced(SyncReport),
}

impl SyncOutcome {
    /// Number of successful updates; zero for [`SyncOutcome::NothingToSync`].
    #[must_use]
    pub fn synced_count(&self) -> usize {
        match self {
            Self::NothingToSync => 0,
            Self::Synced(report) => report.updated(),
        }
    }
}
