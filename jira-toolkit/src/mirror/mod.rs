//! Mirror creation.
//!
//! Copies an issue into another project and links the copy back to the
//! source, skipping issues that already have a mirror there.

mod error;
mod outcome;

pub use error::MirrorError;
pub use outcome::MirrorOutcome;

use crate::client::{JiraClient, NewIssue};
use crate::config::Settings;
use crate::keys::{IssueKey, ProjectKey};
use crate::links::find_mirror_in;
use tracing::{info, info_span, Instrument};

/// Mirrors `source` into `target_project`.
///
/// This function:
/// 1. Fetches the source issue
/// 2. Skips if a mirror already exists ([`find_mirror_in`] over
///    `settings.mirror_link_types` plus `settings.link_type`)
/// 3. Creates the mirror with the source summary, description and due date
///    plus `labels`
/// 4. Links source and mirror with `settings.link_type`
///
/// The existence check and the creation are separate requests with no lock
/// held in between. Two concurrent runs for the same source can both see no
/// mirror and both create one.
///
/// # Errors
///
/// Returns [`MirrorError`] if the source can't be fetched, the mirror can't be
/// created, or the link can't be created. In the last case the mirror issue
/// already exists and is not deleted.
pub async fn create_mirror(
    client: &JiraClient,
    source: &IssueKey,
    target_project: &ProjectKey,
    labels: &[String],
    settings: &Settings,
) -> Result<MirrorOutcome, MirrorError> {
    let span = info_span!("create_mirror", %source, target = %target_project);

    async {
        let issue = client
            .fetch_issue(source.as_str())
            .await
            .map_err(|e| MirrorError::SourceNotFound {
                key: source.to_string(),
                source: e,
            })?;

        // A link made with `link_type` always counts, even if it is missing
        // from `mirror_link_types`.
        let existing = find_mirror_in(&issue, target_project, &settings.mirror_link_types)
            .or_else(|| find_mirror_in(&issue, target_project, &[&settings.link_type]));
        if let Some(existing) = existing {
            info!(existing, "Mirror link already exists, skipping");
            return Ok(MirrorOutcome::AlreadyMirrored {
                existing: existing.to_string(),
            });
        }

        info!("Creating mirror issue");
        let new_issue = NewIssue {
            project: target_project.clone(),
            summary: issue.fields.summary.clone(),
            description: issue.fields.description.clone(),
            issue_type: settings.issue_type.clone(),
            due_date: issue.fields.due_date,
            labels: labels.to_vec(),
        };

        let created = client
            .create_issue(&new_issue)
            .await
            .map_err(|e| MirrorError::CreationFailed {
                key: source.to_string(),
                source: e,
            })?;
        info!(mirror = %created.key, "Created mirror issue");

        client
            .create_link(&settings.link_type, source.as_str(), &created.key)
            .await
            .map_err(|e| MirrorError::LinkFailed {
                key: source.to_string(),
                mirror_key: created.key.clone(),
                source: e,
            })?;

        info!(mirror = %created.key, "Linked mirror to source");
        Ok(MirrorOutcome::Mirrored { key: created.key })
    }
    .instrument(span)
    .await
}
