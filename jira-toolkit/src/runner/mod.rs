//! Runs one operation over a list of tickets.

mod error;
mod operation;

pub use error::RunnerError;
pub use operation::Operation;

use crate::client::JiraClient;
use crate::config::{JiraConfig, Settings};
use crate::keys::IssueKey;
use crate::mirror::create_mirror;
use crate::summary::{BatchSummary, Marker, TicketOutcome};
use crate::sync::sync_due_dates;
use tracing::{error, info, info_span, warn, Instrument};

/// Processes tickets one at a time, never aborting the batch on a single
/// ticket's failure.
pub struct Runner {
    client: JiraClient,
    settings: Settings,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if the HTTP client can't be built.
    pub fn new(config: &JiraConfig, settings: Settings) -> Result<Self, RunnerError> {
        Ok(Self::with_client(JiraClient::new(config)?, settings))
    }

    /// Builds a runner around an existing client.
    #[must_use]
    pub fn with_client(client: JiraClient, settings: Settings) -> Self {
        Self { client, settings }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &JiraClient {
        &self.client
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Applies `operation` to each key in input order.
    ///
    /// Requests are issued sequentially; the summary lists every key in the
    /// order given.
    pub async fn run(&self, keys: &[IssueKey], operation: &Operation) -> BatchSummary {
        let mut summary = BatchSummary::new();
        info!(
            count = keys.len(),
            operation = operation.name(),
            "Processing tickets"
        );

        for key in keys {
            let span = info_span!("ticket", %key);
            let outcome = self.process_ticket(key, operation).instrument(span).await;
            summary.record(key.as_str(), outcome);
        }

        summary
    }

    async fn process_ticket(&self, key: &IssueKey, operation: &Operation) -> TicketOutcome {
        info!("Processing ticket");

        let outcome = match operation {
            Operation::Mirror {
                target_project,
                labels,
            } => {
                let result =
                    create_mirror(&self.client, key, target_project, labels, &self.settings).await;
                if let Some(orphan) = result.as_ref().err().and_then(|e| e.orphan()) {
                    warn!(orphan, "Mirror issue was created but not linked; link or delete it manually");
                }
                TicketOutcome::from(result)
            }
            Operation::SyncDueDates => {
                TicketOutcome::from(sync_due_dates(&self.client, key, &self.settings).await)
            }
        };

        match outcome.marker() {
            Marker::Success => info!(outcome = %outcome, "Ticket done"),
            Marker::Skipped => info!(outcome = %outcome, "Ticket skipped"),
            Marker::Failed => error!(outcome = %outcome, "Ticket failed"),
        }

        outcome
    }
}
