//! Issue client error types.

use thiserror::Error;

/// Errors returned by [`JiraClient`](super::JiraClient).
///
/// Non-success responses keep the HTTP status and the response body so the
/// caller can surface them as diagnostics.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Fetching an issue did not return 200.
    #[error("Failed to fetch issue {key} (status {status}): {body}")]
    NotFound {
        key: String,
        status: u16,
        body: String,
    },

    /// Creating an issue did not return 200/201.
    #[error("Failed to create issue in {project} (status {status}): {body}")]
    CreationFailed {
        project: String,
        status: u16,
        body: String,
    },

    /// Creating an issue link did not return 200/201.
    #[error("Failed to link {inward_key} -> {outward_key} (status {status}): {body}")]
    LinkFailed {
        inward_key: String,
        outward_key: String,
        status: u16,
        body: String,
    },

    /// Updating a due date did not return 204.
    #[error("Failed to update due date for {key} (status {status}): {body}")]
    UpdateFailed {
        key: String,
        status: u16,
        body: String,
    },

    /// Any other endpoint returned a non-success status.
    #[error("Jira request to {endpoint} failed (status {status}): {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// An endpoint path could not be joined onto the base URL.
    #[error("Invalid endpoint '{path}': {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport or response decoding error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Returns the HTTP status of a rejected request, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. }
            | Self::CreationFailed { status, .. }
            | Self::LinkFailed { status, .. }
            | Self::UpdateFailed { status, .. }
            | Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl { .. } => None,
        }
    }
}
