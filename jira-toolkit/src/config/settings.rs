//! Tool settings loaded from an optional TOML file.

use super::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Behaviour knobs shared by every command.
///
/// All keys are optional; missing ones fall back to [`Settings::default`].
///
/// ```toml
/// issue-type = "Task"
/// link-type = "Relates"
/// mirror-link-types = ["Relates", "Mirrors"]
/// sync-link-types = ["Relates"]
/// story-points-field = "customfield_10016"
/// todo-statuses = ["To Do", "Open", "TODO", "BACKLOG"]
/// max-results = 50
/// timeout-secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// Issue type used for newly created mirror issues.
    pub issue_type: String,

    /// Relation used when linking a mirror back to its source.
    pub link_type: String,

    /// Relations that count as an existing mirror.
    pub mirror_link_types: Vec<String>,

    /// Relations whose targets receive the source due date.
    ///
    /// Defaults to `Relates` only, narrower than `mirror_link_types`: a
    /// `Mirrors` link is not followed when syncing due dates.
    pub sync_link_types: Vec<String>,

    /// Custom field holding story points.
    pub story_points_field: String,

    /// Status names treated as "to do" when the board has no matching columns.
    pub todo_statuses: Vec<String>,

    /// Page size for JQL searches.
    pub max_results: u32,

    /// Per-request timeout. Absent means the transport default (none).
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            issue_type: "Task".to_string(),
            link_type: "Relates".to_string(),
            mirror_link_types: vec!["Relates".to_string(), "Mirrors".to_string()],
            sync_link_types: vec!["Relates".to_string()],
            story_points_field: "customfield_10016".to_string(),
            todo_statuses: ["To Do", "Open", "TODO", "BACKLOG"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_results: 50,
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");
        let path_str = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path_str.clone(),
            source: e,
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path_str.clone(),
            source: e,
        })?;

        settings.validate(&path_str)?;
        Ok(settings)
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let fail = |message: &str| {
            Err(ConfigError::ValidationError {
                path: path.to_string(),
                message: message.to_string(),
            })
        };

        if self.issue_type.trim().is_empty() {
            return fail("issue-type must not be empty");
        }
        if self.link_type.trim().is_empty() {
            return fail("link-type must not be empty");
        }
        if self.mirror_link_types.is_empty() {
            return fail("mirror-link-types must list at least one relation");
        }
        if !self.mirror_link_types.contains(&self.link_type) {
            return fail("mirror-link-types must include link-type");
        }
        if self.sync_link_types.is_empty() {
            return fail("sync-link-types must list at least one relation");
        }
        if self.todo_statuses.is_empty() {
            return fail("todo-statuses must list at least one status");
        }
        if self.max_results == 0 {
            return fail("max-results must be greater than zero");
        }
        if self.timeout_secs == Some(0) {
            return fail("timeout-secs must be greater than zero");
        }

        Ok(())
    }
}
