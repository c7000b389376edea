//! Mirror creation error types.

use crate::client::ClientError;
use thiserror::Error;

/// Errors that can occur while mirroring an issue.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The source issue could not be fetched.
    #[error("Source issue {key} not found: {source}")]
    SourceNotFound { key: String, source: ClientError },

    /// The mirror issue could not be created.
    #[error("Failed to create mirror of {key}: {source}")]
    CreationFailed { key: String, source: ClientError },

    /// The mirror was created but linking it back failed.
    ///
    /// The created issue is left in place, unlinked.
    #[error("Created {mirror_key} but failed to link it to {key}: {source}")]
    LinkFailed {
        key: String,
        mirror_key: String,
        source: ClientError,
    },
}

impl MirrorError {
    /// Key of an issue created before the failure, if any.
    #[must_use]
    pub fn orphan(&self) -> Option<&str> {
        match self {
            Self::LinkFailed { mirror_key, .. } => Some(mirror_key),
            _ => None,
        }
    }
}
