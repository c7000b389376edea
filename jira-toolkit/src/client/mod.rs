//! Jira REST client.
//!
//! A thin wrapper over `reqwest` with basic authentication. Every method
//! issues exactly one request; there is no caching and no retry.

mod error;
mod types;

pub use error::ClientError;
pub use types::{
    Board, BoardConfiguration, BoardLocation, ColumnConfig, CreatedIssue, Issue, IssueFields,
    IssueLink, IssueRef, Named, NewIssue, ProjectRef,
};

use crate::config::JiraConfig;
use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::json;
use tracing::debug;
use types::IssueList;
use url::Url;

const ISSUE_PATH: &str = "rest/api/2/issue";
const ISSUE_LINK_PATH: &str = "rest/api/2/issueLink";
const SEARCH_PATH: &str = "rest/api/2/search";
const BOARD_PATH: &str = "rest/agile/1.0/board";

/// Authenticated Jira client.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client can't be built.
    pub fn new(config: &JiraConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url().clone(),
            email: config.email().to_string(),
            api_token: config.api_token().to_string(),
        })
    }

    /// Fetches the full representation of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when Jira does not answer 200.
    pub async fn fetch_issue(&self, key: &str) -> Result<Issue, ClientError> {
        debug!(key, "Fetching issue");
        let url = self.endpoint(&format!("{ISSUE_PATH}/{key}"))?;
        let response = self.request(Method::GET, url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::NotFound {
                key: key.to_string(),
                status: status.as_u16(),
                body: body_text(response).await,
            });
        }

        Ok(response.json().await?)
    }

    /// Creates an issue. Every successful call creates a new remote issue.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CreationFailed`] when Jira does not answer
    /// 200/201.
    pub async fn create_issue(&self, new_issue: &NewIssue) -> Result<CreatedIssue, ClientError> {
        debug!(project = %new_issue.project, summary = %new_issue.summary, "Creating issue");
        let url = self.endpoint(ISSUE_PATH)?;
        let response = self
            .request(Method::POST, url)
            .json(&new_issue.payload())
            .send()
            .await?;

        let status = response.status();
        if !is_created(status) {
            return Err(ClientError::CreationFailed {
                project: new_issue.project.to_string(),
                status: status.as_u16(),
                body: body_text(response).await,
            });
        }

        Ok(response.json().await?)
    }

    /// Links two issues with the named relation.
    ///
    /// `inward_key` is the issue the relation points from (the source of a
    /// mirror), `outward_key` the one it points to. Jira stores duplicate
    /// links, so callers must check for an existing one first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::LinkFailed`] when Jira does not answer 200/201.
    pub async fn create_link(
        &self,
        relation: &str,
        inward_key: &str,
        outward_key: &str,
    ) -> Result<(), ClientError> {
        debug!(relation, inward_key, outward_key, "Creating issue link");
        let url = self.endpoint(ISSUE_LINK_PATH)?;
        let payload = json!({
            "type": { "name": relation },
            "inwardIssue": { "key": inward_key },
            "outwardIssue": { "key": outward_key },
        });
        let response = self.request(Method::POST, url).json(&payload).send().await?;

        let status = response.status();
        if !is_created(status) {
            return Err(ClientError::LinkFailed {
                inward_key: inward_key.to_string(),
                outward_key: outward_key.to_string(),
                status: status.as_u16(),
                body: body_text(response).await,
            });
        }

        Ok(())
    }

    /// Sets the due date of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UpdateFailed`] when Jira does not answer 204.
    pub async fn update_due_date(&self, key: &str, due_date: NaiveDate) -> Result<(), ClientError> {
        debug!(key, %due_date, "Updating due date");
        let url = self.endpoint(&format!("{ISSUE_PATH}/{key}"))?;
        let payload = json!({
            "fields": { "duedate": due_date.format("%Y-%m-%d").to_string() }
        });
        let response = self.request(Method::PUT, url).json(&payload).send().await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            return Err(ClientError::UpdateFailed {
                key: key.to_string(),
                status: status.as_u16(),
                body: body_text(response).await,
            });
        }

        Ok(())
    }

    /// Fetches a board.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when Jira does not answer 200.
    pub async fn fetch_board(&self, board_id: u64) -> Result<Board, ClientError> {
        self.get_json(&format!("{BOARD_PATH}/{board_id}")).await
    }

    /// Fetches a board's configuration (location and columns).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when Jira does not answer 200.
    pub async fn fetch_board_configuration(
        &self,
        board_id: u64,
    ) -> Result<BoardConfiguration, ClientError> {
        self.get_json(&format!("{BOARD_PATH}/{board_id}/configuration"))
            .await
    }

    /// Lists the issues on a board (first page, as Jira returns it).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when Jira does not answer 200.
    pub async fn board_issues(&self, board_id: u64) -> Result<Vec<Issue>, ClientError> {
        let list: IssueList = self
            .get_json(&format!("{BOARD_PATH}/{board_id}/issue"))
            .await?;
        Ok(list.issues)
    }

    /// Runs a JQL search, returning only the requested fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when Jira does not answer 200.
    pub async fn search_issues(
        &self,
        jql: &str,
        fields: &[&str],
        max_results: u32,
    ) -> Result<Vec<Issue>, ClientError> {
        debug!(jql, max_results, "Searching issues");
        let url = self.endpoint(SEARCH_PATH)?;
        let payload = json!({
            "jql": jql,
            "maxResults": max_results,
            "fields": fields,
        });
        let response = self.request(Method::POST, url).json(&payload).send().await?;
        let list: IssueList = expect_ok(SEARCH_PATH, response).await?;
        Ok(list.issues)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        let url = self.endpoint(path)?;
        let response = self.request(Method::GET, url).send().await?;
        expect_ok(path, response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidUrl {
                path: path.to_string(),
                source,
            })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(ACCEPT, "application/json")
    }
}

fn is_created(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

async fn expect_ok<T: serde::de::DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(ClientError::Api {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: body_text(response).await,
        });
    }
    Ok(response.json().await?)
}

async fn body_text(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable response body: {e}>"))
}
