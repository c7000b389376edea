//! Per-ticket outcome types.

use crate::mirror::{MirrorError, MirrorOutcome};
use crate::sync::{SyncError, SyncOutcome};
use serde::Serialize;
use std::fmt;

/// How a ticket is shown in the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Success,
    Skipped,
    Failed,
}

impl Marker {
    /// Symbol used in the console summary.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Skipped => "-",
            Self::Failed => "✗",
        }
    }
}

/// Outcome of processing a single ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TicketOutcome {
    /// A mirror was created and linked.
    Mirrored { mirror_key: String },

    /// A mirror already existed.
    AlreadyMirrored { existing: String },

    /// Due dates were propagated to `updated` issues; `failed` updates were rejected.
    Synced { updated: usize, failed: usize },

    /// The source had no due date.
    NothingToSync,

    /// The source issue could not be fetched.
    SourceNotFound { error: String },

    /// Any later step failed.
    Failed { error: String },
}

impl TicketOutcome {
    /// Success / skipped / failed classification.
    ///
    /// A sync where every candidate update was rejected counts as failed; a
    /// sync with no candidates counts as skipped.
    #[must_use]
    pub fn marker(&self) -> Marker {
        match self {
            Self::Mirrored { .. } => Marker::Success,
            Self::Synced { updated, .. } if *updated > 0 => Marker::Success,
            Self::Synced { failed, .. } if *failed > 0 => Marker::Failed,
            Self::Synced { .. } | Self::AlreadyMirrored { .. } | Self::NothingToSync => {
                Marker::Skipped
            }
            Self::SourceNotFound { .. } | Self::Failed { .. } => Marker::Failed,
        }
    }
}

impl fmt::Display for TicketOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mirrored { mirror_key } => write!(f, "mirrored as {mirror_key}"),
            Self::AlreadyMirrored { existing } => write!(f, "already mirrored ({existing})"),
            Self::Synced { updated: 0, failed: 0 } => f.write_str("no updates needed"),
            Self::Synced { updated, failed: 0 } => write!(f, "{updated} due date(s) updated"),
            Self::Synced { updated, failed } => {
                write!(f, "{updated} due date(s) updated, {failed} failed")
            }
            Self::NothingToSync => f.write_str("no due date to sync"),
            Self::SourceNotFound { error } | Self::Failed { error } => f.write_str(error),
        }
    }
}

impl From<Result<MirrorOutcome, MirrorError>> for TicketOutcome {
    fn from(result: Result<MirrorOutcome, MirrorError>) -> Self {
        match result {
            Ok(MirrorOutcome::Mirrored { key }) => Self::Mirrored { mirror_key: key },
            Ok(MirrorOutcome::AlreadyMirrored { existing }) => Self::AlreadyMirrored { existing },
            Err(e @ MirrorError::SourceNotFound { .. }) => Self::SourceNotFound {
                error: e.to_string(),
            },
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

impl From<Result<SyncOutcome, SyncError>> for TicketOutcome {
    fn from(result: Result<SyncOutcome, SyncError>) -> Self {
        match result {
            Ok(SyncOutcome::NothingToSync) => Self::NothingToSync,
            Ok(SyncOutcome::Synced(report)) => Self::Synced {
                updated: report.updated(),
                failed: report.failed(),
            },
            Err(e @ SyncError::SourceNotFound { .. }) => Self::SourceNotFound {
                error: e.to_string(),
            },
        }
    }
}

/// A ticket key paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketResult {
    /// Ticket key as processed.
    pub key: String,

    /// Outcome.
    pub outcome: TicketOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_markers_depend_on_counts() {
        let marker = |updated, failed| TicketOutcome::Synced { updated, failed }.marker();

        assert_eq!(marker(1, 0), Marker::Success);
        assert_eq!(marker(1, 3), Marker::Success);
        assert_eq!(marker(0, 2), Marker::Failed);
        assert_eq!(marker(0, 0), Marker::Skipped);
    }

    #[test]
    fn skip_outcomes_are_not_failures() {
        assert_eq!(TicketOutcome::NothingToSync.marker(), Marker::Skipped);
        assert_eq!(
            TicketOutcome::AlreadyMirrored {
                existing: "DEV-200".to_string()
            }
            .marker(),
            Marker::Skipped
        );
    }

    #[test]
    fn displays_outcomes() {
        let outcome = TicketOutcome::Mirrored {
            mirror_key: "DEV-201".to_string(),
        };
        assert_eq!(outcome.to_string(), "mirrored as DEV-201");

        let outcome = TicketOutcome::Synced {
            updated: 2,
            failed: 1,
        };
        assert_eq!(outcome.to_string(), "2 due date(s) updated, 1 failed");
    }
}
