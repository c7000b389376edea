//! Board queries: project lookup, the current user's TODO issues, and board
//! issue listings.

mod error;
mod metrics;

pub use error::BoardError;
pub use metrics::BoardMetrics;

use crate::client::{BoardConfiguration, Issue, JiraClient};
use crate::config::Settings;
use tracing::{debug, info, warn};

/// Column names containing one of these (case-insensitive) are "to do" columns.
const TODO_COLUMN_WORDS: [&str; 4] = ["todo", "to do", "open", "backlog"];

/// Fields requested for TODO searches.
const TODO_FIELDS: [&str; 5] = ["summary", "status", "created", "priority", "issuetype"];

/// TODO issues of the current user on a board.
#[derive(Debug, Clone)]
pub struct TodoIssues {
    /// Project the board belongs to.
    pub project_key: String,

    /// JQL that was run.
    pub jql: String,

    /// Matching issues, newest first.
    pub issues: Vec<Issue>,
}

/// Resolves the project key behind a board.
///
/// Tries the board's location, then its first listed project, then the
/// board configuration's location.
///
/// # Errors
///
/// Returns [`BoardError::ProjectNotFound`] if no source names a project, or
/// [`BoardError::Client`] if the configuration request fails.
pub async fn resolve_project_key(client: &JiraClient, board_id: u64) -> Result<String, BoardError> {
    match client.fetch_board(board_id).await {
        Ok(board) => {
            let key = board
                .location
                .and_then(|l| l.project_key)
                .or_else(|| board.projects.into_iter().next().map(|p| p.key));
            if let Some(key) = key {
                debug!(board_id, project = %key, "Resolved project from board");
                return Ok(key);
            }
        }
        Err(e) => warn!(board_id, error = %e, "Failed to fetch board, trying configuration"),
    }

    let config = client.fetch_board_configuration(board_id).await?;
    config
        .location
        .and_then(|l| l.project_key)
        .ok_or(BoardError::ProjectNotFound { board_id })
}

/// Returns board columns that look like "to do" columns.
#[must_use]
pub fn todo_columns(config: &BoardConfiguration) -> Vec<String> {
    config
        .column_config
        .iter()
        .flat_map(|c| c.columns.iter())
        .map(|column| column.name.clone())
        .filter(|name| {
            let lower = name.to_lowercase();
            TODO_COLUMN_WORDS.iter().any(|word| lower.contains(word))
        })
        .collect()
}

/// Builds the JQL for the current user's open issues in a project.
#[must_use]
pub fn build_todo_jql(project_key: &str, statuses: &[String]) -> String {
    let statuses = statuses
        .iter()
        .map(|s| format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "project = {project_key} AND assignee = currentUser() AND status in ({statuses}) ORDER BY created DESC"
    )
}

/// Fetches the current user's TODO issues on a board.
///
/// Status names come from the board's "to do" columns when the board
/// configuration is readable and has any, otherwise from
/// `settings.todo_statuses`.
///
/// # Errors
///
/// Returns [`BoardError`] if the project can't be resolved or the search fails.
pub async fn todo_issues(
    client: &JiraClient,
    board_id: u64,
    settings: &Settings,
) -> Result<TodoIssues, BoardError> {
    let project_key = resolve_project_key(client, board_id).await?;

    let statuses = match client.fetch_board_configuration(board_id).await {
        Ok(config) => {
            let columns = todo_columns(&config);
            if columns.is_empty() {
                settings.todo_statuses.clone()
            } else {
                columns
            }
        }
        Err(e) => {
            warn!(board_id, error = %e, "Failed to fetch board configuration, using default statuses");
            settings.todo_statuses.clone()
        }
    };

    let jql = build_todo_jql(&project_key, &statuses);
    info!(project = %project_key, jql = %jql, "Searching TODO issues");
    let issues = client
        .search_issues(&jql, &TODO_FIELDS, settings.max_results)
        .await?;

    Ok(TodoIssues {
        project_key,
        jql,
        issues,
    })
}

/// Lists the issues on a board.
///
/// # Errors
///
/// Returns [`BoardError::Client`] if the request fails.
pub async fn board_issues(client: &JiraClient, board_id: u64) -> Result<Vec<Issue>, BoardError> {
    info!(board_id, "Fetching board issues");
    Ok(client.board_issues(board_id).await?)
}
