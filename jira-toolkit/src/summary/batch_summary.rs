//! Batch summary.

use super::result::{Marker, TicketOutcome, TicketResult};

/// Ordered results of a batch run plus counters.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Results in input order.
    results: Vec<TicketResult>,

    /// Number of tickets processed successfully.
    pub succeeded: usize,

    /// Number of tickets skipped (already mirrored, nothing to sync).
    pub skipped: usize,

    /// Number of tickets that failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the outcome for `key`.
    pub fn record(&mut self, key: impl Into<String>, outcome: TicketOutcome) {
        match outcome.marker() {
            Marker::Success => self.succeeded += 1,
            Marker::Skipped => self.skipped += 1,
            Marker::Failed => self.failed += 1,
        }
        self.results.push(TicketResult {
            key: key.into(),
            outcome,
        });
    }

    /// Results in the order the tickets were given.
    #[must_use]
    pub fn results(&self) -> &[TicketResult] {
        &self.results
    }

    /// Returns true if any ticket failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns true if the batch was non-empty and no source issue could be
    /// fetched at all.
    #[must_use]
    pub fn all_fetches_failed(&self) -> bool {
        !self.results.is_empty()
            && self
                .results
                .iter()
                .all(|r| matches!(r.outcome, TicketOutcome::SourceNotFound { .. }))
    }
}
