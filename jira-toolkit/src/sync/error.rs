//! Due-date sync error types.

use crate::client::ClientError;
use thiserror::Error;

/// Errors that abort a due-date sync for one source issue.
///
/// Failures on individual targets are not errors; they are recorded in the
/// [`SyncReport`](super::SyncReport).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source issue could not be fetched.
    #[error("Source issue {key} not found: {source}")]
    SourceNotFound { key: String, source: ClientError },
}
