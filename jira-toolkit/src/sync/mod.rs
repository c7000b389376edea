//! Due-date propagation over issue links.

mod error;
mod report;

pub use error::SyncError;
pub use report::{SyncOutcome, SyncReport, TargetUpdate, UpdateStatus};

use crate::client::JiraClient;
use crate::config::Settings;
use crate::keys::IssueKey;
use crate::links::find_stale_due_date_targets;
use tracing::{info, info_span, warn, Instrument};

/// Copies the due date of `source` to related issues that have none.
///
/// Only relations listed in `settings.sync_link_types` are followed. Each
/// target is updated independently; a rejected update is recorded and the
/// remaining targets are still processed.
///
/// # Errors
///
/// Returns [`SyncError::SourceNotFound`] if the source can't be fetched.
pub async fn sync_due_dates(
    client: &JiraClient,
    source: &IssueKey,
    settings: &Settings,
) -> Result<SyncOutcome, SyncError> {
    let span = info_span!("sync_due_dates", %source);

    async {
        let issue = client
            .fetch_issue(source.as_str())
            .await
            .map_err(|e| SyncError::SourceNotFound {
                key: source.to_string(),
                source: e,
            })?;

        let Some(due_date) = issue.fields.due_date else {
            info!("Source has no due date, skipping");
            return Ok(SyncOutcome::NothingToSync);
        };

        let targets =
            find_stale_due_date_targets(client, &issue, &settings.sync_link_types).await;
        info!(%due_date, targets = targets.len(), "Found related issues without a due date");

        let mut updates = Vec::with_capacity(targets.len());
        for key in targets {
            let status = match client.update_due_date(&key, due_date).await {
                Ok(()) => {
                    info!(related = %key, "Updated due date");
                    UpdateStatus::Updated
                }
                Err(e) => {
                    warn!(related = %key, error = %e, "Failed to update due date");
                    UpdateStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            updates.push(TargetUpdate { key, status });
        }

        Ok(SyncOutcome::Synced(SyncReport { due_date, updates }))
    }
    .instrument(span)
    .await
}
