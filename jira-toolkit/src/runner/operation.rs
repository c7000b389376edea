//! Batch operations.

use crate::keys::ProjectKey;

/// Operation applied to every ticket of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Mirror each ticket into `target_project`, adding `labels`.
    Mirror {
        target_project: ProjectKey,
        labels: Vec<String>,
    },

    /// Copy each ticket's due date to related issues missing one.
    SyncDueDates,
}

impl Operation {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mirror { .. } => "mirror",
            Self::SyncDueDates => "sync-due-dates",
        }
    }
}
