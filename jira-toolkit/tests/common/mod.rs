#![allow(dead_code)]

use jira_toolkit::{JiraClient, JiraConfig};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::path::PathBuf;

pub const EMAIL: &str = "me@acme.io";
pub const TOKEN: &str = "test-token";
/// `Basic base64("me@acme.io:test-token")`
pub const AUTHORIZATION: &str = "Basic bWVAYWNtZS5pbzp0ZXN0LXRva2Vu";

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_root().join(name)).unwrap()
}

pub fn client_for(server: &ServerGuard) -> JiraClient {
    let config = JiraConfig::new(&server.url(), EMAIL, TOKEN).unwrap();
    JiraClient::new(&config).unwrap()
}

/// Issue body with optional due date and `(relation, key, outward)` links.
pub fn issue_json(key: &str, due_date: Option<&str>, links: &[(&str, &str, bool)]) -> Value {
    let links: Vec<Value> = links
        .iter()
        .map(|(relation, linked, outward)| {
            let side = if *outward { "outwardIssue" } else { "inwardIssue" };
            let mut link = json!({ "type": { "name": relation } });
            link[side] = json!({ "key": linked });
            link
        })
        .collect();

    json!({
        "key": key,
        "fields": {
            "summary": format!("Summary of {key}"),
            "description": null,
            "duedate": due_date,
            "labels": [],
            "issuelinks": links
        }
    })
}

pub async fn mock_issue(server: &mut ServerGuard, key: &str, body: &Value) -> Mock {
    server
        .mock("GET", format!("/rest/api/2/issue/{key}").as_str())
        .match_header("authorization", AUTHORIZATION)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn mock_missing_issue(server: &mut ServerGuard, key: &str) -> Mock {
    server
        .mock("GET", format!("/rest/api/2/issue/{key}").as_str())
        .with_status(404)
        .with_body(r#"{"errorMessages":["Issue does not exist or you do not have permission to see it."],"errors":{}}"#)
        .create_async()
        .await
}

pub async fn mock_due_date_update(
    server: &mut ServerGuard,
    key: &str,
    due_date: &str,
    status: usize,
) -> Mock {
    server
        .mock("PUT", format!("/rest/api/2/issue/{key}").as_str())
        .match_header("authorization", AUTHORIZATION)
        .match_body(Matcher::Json(json!({ "fields": { "duedate": due_date } })))
        .with_status(status)
        .create_async()
        .await
}
