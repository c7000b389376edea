//! Board query error types.

use crate::client::ClientError;
use thiserror::Error;

/// Errors that can occur during board queries.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Neither the board nor its configuration names a project.
    #[error("Could not determine project key for board {board_id}")]
    ProjectNotFound { board_id: u64 },

    /// Jira API error.
    #[error(transparent)]
    Client(#[from] ClientError),
}
