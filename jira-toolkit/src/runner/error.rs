//! Runner error types.

/// Errors that prevent a run from starting.
///
/// Once a batch is running, per-ticket failures are recorded in the
/// [`BatchSummary`](crate::summary::BatchSummary) instead.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration and settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// HTTP client initialization errors.
    #[error(transparent)]
    Client(#[from] crate::client::ClientError),
}
