//! Link reconciliation.
//!
//! Decides, from an issue's link list, whether a mirror already exists in a
//! target project and which related issues are missing a due date.
//!
//! "Is a mirror" is a heuristic: any accepted relation to an issue whose key
//! starts with the target project prefix counts. A coincidental `Relates`
//! link into the target project is therefore treated as a mirror.

use crate::client::{Issue, IssueLink, JiraClient};
use crate::keys::ProjectKey;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Relations that mark an existing mirror.
pub const MIRROR_LINK_TYPES: [&str; 2] = ["Relates", "Mirrors"];

/// Relations followed when propagating due dates.
///
/// Deliberately narrower than [`MIRROR_LINK_TYPES`]: mirrors linked with
/// `Mirrors` never receive a synced due date.
pub const SYNC_LINK_TYPES: [&str; 1] = ["Relates"];

/// Returns the key of the first linked issue that looks like a mirror of
/// `issue` in `target_project`.
///
/// Links are scanned in list order and the first match wins.
pub fn find_mirror_in<'a, S: AsRef<str>>(
    issue: &'a Issue,
    target_project: &ProjectKey,
    link_types: &[S],
) -> Option<&'a str> {
    let prefix = target_project.issue_prefix();
    issue
        .fields
        .issue_links
        .iter()
        .filter(|link| accepts(link_types, link))
        .filter_map(IssueLink::linked_issue)
        .map(|linked| linked.key.as_str())
        .find(|key| key.starts_with(&prefix))
}

/// Returns true if `issue` already has a mirror in `target_project`, using
/// the default `Relates` / `Mirrors` relations.
#[must_use]
pub fn has_mirror_in(issue: &Issue, target_project: &ProjectKey) -> bool {
    find_mirror_in(issue, target_project, &MIRROR_LINK_TYPES).is_some()
}

/// Keys of issues linked to `issue` through one of `link_types`, in link
/// order. A key reached through several links appears once.
pub fn linked_keys<'a, S: AsRef<str>>(issue: &'a Issue, link_types: &[S]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    issue
        .fields
        .issue_links
        .iter()
        .filter(|link| accepts(link_types, link))
        .filter_map(IssueLink::linked_issue)
        .map(|linked| linked.key.as_str())
        .filter(|key| seen.insert(*key))
        .collect()
}

/// Finds related issues that have no due date while `issue` has one.
///
/// Each candidate is re-fetched because link payloads carry no due date.
/// Returns an empty list if `issue` itself has no due date. A candidate that
/// can't be fetched is logged and left out.
pub async fn find_stale_due_date_targets<S: AsRef<str>>(
    client: &JiraClient,
    issue: &Issue,
    link_types: &[S],
) -> Vec<String> {
    if issue.fields.due_date.is_none() {
        return Vec::new();
    }

    let mut stale = Vec::new();
    for key in linked_keys(issue, link_types) {
        debug!(linked = key, "Checking related issue");
        match client.fetch_issue(key).await {
            Ok(linked) if linked.fields.due_date.is_none() => stale.push(key.to_string()),
            Ok(_) => debug!(linked = key, "Related issue already has a due date"),
            Err(e) => warn!(linked = key, error = %e, "Failed to fetch related issue, skipping"),
        }
    }

    stale
}

fn accepts<S: AsRef<str>>(link_types: &[S], link: &IssueLink) -> bool {
    link_types.iter().any(|t| t.as_ref() == link.type_name())
}
