//! Jira REST payloads.
//!
//! Only the fields the tools read are modelled; everything else in an
//! issue's `fields` object is kept in [`IssueFields::extra`].

use crate::keys::ProjectKey;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Map, Value};

/// A Jira issue as returned by `GET /rest/api/2/issue/{key}` and searches.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue key (e.g. `EXMP-152`).
    pub key: String,

    /// Issue fields.
    #[serde(default)]
    pub fields: IssueFields,
}

/// The `fields` object of an issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "duedate")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: Option<Named>,

    #[serde(default, rename = "issuetype")]
    pub issue_type: Option<Named>,

    #[serde(default)]
    pub priority: Option<Named>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,

    /// Child issues in the order Jira lists them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtasks: Vec<IssueRef>,

    /// Links to other issues. Jira does not deduplicate these.
    #[serde(default, rename = "issuelinks", deserialize_with = "null_as_default")]
    pub issue_links: Vec<IssueLink>,

    /// Remaining fields, including custom fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Any `{ "name": ... }` object (status, issue type, priority).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: String,
}

/// Reference to another issue inside a link or subtask list.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    pub key: String,
}

/// A typed relation between two issues.
///
/// Exactly one of `outward_issue` / `inward_issue` is populated, depending on
/// which side of the relation the containing issue is on.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueLink {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "type")]
    pub link_type: Named,

    #[serde(default, rename = "outwardIssue")]
    pub outward_issue: Option<IssueRef>,

    #[serde(default, rename = "inwardIssue")]
    pub inward_issue: Option<IssueRef>,
}

impl IssueLink {
    /// Relation type name, e.g. `Relates`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.link_type.name
    }

    /// The issue on the other end: outward if present, else inward.
    #[must_use]
    pub fn linked_issue(&self) -> Option<&IssueRef> {
        self.outward_issue.as_ref().or(self.inward_issue.as_ref())
    }
}

impl Issue {
    /// Status name, if the response included it.
    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Issue type name, if the response included it.
    #[must_use]
    pub fn issue_type_name(&self) -> Option<&str> {
        self.fields.issue_type.as_ref().map(|t| t.name.as_str())
    }

    /// Priority name, if the response included it.
    #[must_use]
    pub fn priority_name(&self) -> Option<&str> {
        self.fields.priority.as_ref().map(|p| p.name.as_str())
    }

    /// Keys of child issues.
    pub fn subtask_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.subtasks.iter().map(|s| s.key.as_str())
    }

    /// Story points stored in the given custom field.
    #[must_use]
    pub fn story_points(&self, field: &str) -> Option<f64> {
        self.fields.extra.get(field).and_then(Value::as_f64)
    }
}

/// Response of `POST /rest/api/2/issue`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(default, rename = "self")]
    pub url: Option<String>,
}

/// An issue to be created.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project: ProjectKey,
    pub summary: String,
    pub description: Option<String>,
    pub issue_type: String,
    pub due_date: Option<NaiveDate>,
    pub labels: Vec<String>,
}

impl NewIssue {
    /// Builds the `POST /rest/api/2/issue` body.
    ///
    /// `duedate` and `labels` are only sent when set; an absent description
    /// is sent as an empty string.
    #[must_use]
    pub fn payload(&self) -> Value {
        let mut fields = json!({
            "project": { "key": self.project.as_str() },
            "summary": self.summary,
            "description": self.description.as_deref().unwrap_or_default(),
            "issuetype": { "name": self.issue_type },
        });

        if let Some(due_date) = self.due_date {
            fields["duedate"] = json!(due_date.format("%Y-%m-%d").to_string());
        }
        if !self.labels.is_empty() {
            fields["labels"] = json!(self.labels);
        }

        json!({ "fields": fields })
    }
}

/// A board from the agile API.
#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub location: Option<BoardLocation>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectRef>,
}

/// Where a board (or its configuration) lives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardLocation {
    #[serde(default, rename = "projectKey", alias = "key")]
    pub project_key: Option<String>,
}

/// A project reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub key: String,
}

/// Response of `GET /rest/agile/1.0/board/{id}/configuration`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfiguration {
    #[serde(default)]
    pub location: Option<BoardLocation>,

    #[serde(default, rename = "columnConfig")]
    pub column_config: Option<ColumnConfig>,
}

/// Board column layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<Named>,
}

/// Issue list returned by searches and board issue listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct IssueList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
