#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod board;
pub mod client;
pub mod config;
pub mod describe;
pub mod keys;
pub mod links;
pub mod mirror;
pub mod runner;
pub mod summary;
pub mod sync;

pub use board::{
    board_issues, build_todo_jql, resolve_project_key, todo_columns, todo_issues, BoardError,
    BoardMetrics, TodoIssues,
};
pub use client::{
    Board, BoardConfiguration, ClientError, CreatedIssue, Issue, IssueFields, IssueLink,
    IssueRef, JiraClient, NewIssue,
};
pub use config::{ConfigError, JiraConfig, Settings};
pub use describe::{render_description, wrap_text, WRAP_WIDTH};
pub use keys::{IssueKey, KeyError, ProjectKey};
pub use links::{
    find_mirror_in, find_stale_due_date_targets, has_mirror_in, linked_keys, MIRROR_LINK_TYPES,
    SYNC_LINK_TYPES,
};
pub use mirror::{create_mirror, MirrorError, MirrorOutcome};
pub use runner::{Operation, Runner, RunnerError};
pub use summary::{BatchSummary, Marker, TicketOutcome, TicketResult};
pub use sync::{sync_due_dates, SyncError, SyncOutcome, SyncReport, TargetUpdate, UpdateStatus};
