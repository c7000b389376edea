mod common;

use common::{client_for, issue_json, mock_issue, mock_missing_issue, AUTHORIZATION};
use jira_toolkit::{create_mirror, IssueKey, MirrorError, MirrorOutcome, ProjectKey, Settings};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

fn source_issue(links: serde_json::Value) -> serde_json::Value {
    json!({
        "key": "EXMP-152",
        "fields": {
            "summary": "Fix login bug",
            "description": "Users cannot log in on mobile",
            "duedate": "2024-06-01",
            "labels": ["frontend"],
            "issuelinks": links
        }
    })
}

async fn mock_create(server: &mut ServerGuard, status: usize) -> Mock {
    server
        .mock("POST", "/rest/api/2/issue")
        .match_header("authorization", AUTHORIZATION)
        .match_body(Matcher::Json(json!({
            "fields": {
                "project": { "key": "DEV" },
                "summary": "Fix login bug",
                "description": "Users cannot log in on mobile",
                "issuetype": { "name": "Task" },
                "duedate": "2024-06-01",
                "labels": ["mirror"]
            }
        })))
        .with_status(status)
        .with_body(r#"{"id":"10201","key":"DEV-201","self":"https://acme.atlassian.net/rest/api/2/issue/10201"}"#)
        .create_async()
        .await
}

async fn mock_link(server: &mut ServerGuard, status: usize) -> Mock {
    server
        .mock("POST", "/rest/api/2/issueLink")
        .match_header("authorization", AUTHORIZATION)
        .match_body(Matcher::Json(json!({
            "type": { "name": "Relates" },
            "inwardIssue": { "key": "EXMP-152" },
            "outwardIssue": { "key": "DEV-201" }
        })))
        .with_status(status)
        .create_async()
        .await
}

fn keys() -> (IssueKey, ProjectKey) {
    (
        IssueKey::parse("EXMP-152").unwrap(),
        ProjectKey::parse("DEV").unwrap(),
    )
}

fn labels() -> Vec<String> {
    vec!["mirror".to_string()]
}

#[tokio::test]
async fn creates_and_links_mirror() {
    let mut server = mockito::Server::new_async().await;
    let fetch = mock_issue(&mut server, "EXMP-152", &source_issue(json!([]))).await;
    let create = mock_create(&mut server, 201).await;
    let link = mock_link(&mut server, 201).await;
    let (source, target) = keys();

    let outcome = create_mirror(
        &client_for(&server),
        &source,
        &target,
        &labels(),
        &Settings::default(),
    )
    .await
    .unwrap();

    fetch.assert_async().await;
    create.assert_async().await;
    link.assert_async().await;
    assert_eq!(
        outcome,
        MirrorOutcome::Mirrored {
            key: "DEV-201".to_string()
        }
    );
}

#[tokio::test]
async fn existing_mirrors_link_skips_creation() {
    let mut server = mockito::Server::new_async().await;
    mock_issue(
        &mut server,
        "EXMP-152",
        &source_issue(json!([
            { "type": { "name": "Mirrors" }, "outwardIssue": { "key": "DEV-200" } }
        ])),
    )
    .await;
    let create = mock_create(&mut server, 201).await.expect(0);
    let (source, target) = keys();

    let outcome = create_mirror(
        &client_for(&server),
        &source,
        &target,
        &labels(),
        &Settings::default(),
    )
    .await
    .unwrap();

    create.assert_async().await;
    assert_eq!(
        outcome,
        MirrorOutcome::AlreadyMirrored {
            existing: "DEV-200".to_string()
        }
    );
}

#[tokio::test]
async fn second_run_observes_first_link() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server);
    let settings = Settings::default();
    let (source, target) = keys();

    let first_fetch = mock_issue(&mut server, "EXMP-152", &source_issue(json!([]))).await;
    let create = mock_create(&mut server, 201).await.expect(1);
    mock_link(&mut server, 201).await;

    let first = create_mirror(&client, &source, &target, &labels(), &settings)
        .await
        .unwrap();
    assert!(matches!(first, MirrorOutcome::Mirrored { .. }));
    first_fetch.remove_async().await;

    mock_issue(
        &mut server,
        "EXMP-152",
        &source_issue(json!([
            { "type": { "name": "Relates" }, "outwardIssue": { "key": "DEV-201" } }
        ])),
    )
    .await;

    let second = create_mirror(&client, &source, &target, &labels(), &settings)
        .await
        .unwrap();

    create.assert_async().await;
    assert_eq!(
        second,
        MirrorOutcome::AlreadyMirrored {
            existing: "DEV-201".to_string()
        }
    );
}

#[tokio::test]
async fn relates_link_to_other_project_does_not_block() {
    let mut server = mockito::Server::new_async().await;
    mock_issue(
        &mut server,
        "EXMP-152",
        &source_issue(json!([
            { "type": { "name": "Relates" }, "outwardIssue": { "key": "OPS-4" } },
            { "type": { "name": "Blocks" }, "outwardIssue": { "key": "DEV-9" } }
        ])),
    )
    .await;
    let create = mock_create(&mut server, 201).await;
    mock_link(&mut server, 201).await;
    let (source, target) = keys();

    let outcome = create_mirror(
        &client_for(&server),
        &source,
        &target,
        &labels(),
        &Settings::default(),
    )
    .await
    .unwrap();

    create.assert_async().await;
    assert!(matches!(outcome, MirrorOutcome::Mirrored { .. }));
}

#[tokio::test]
async fn missing_source_is_reported() {
    let mut server = mockito::Server::new_async().await;
    mock_missing_issue(&mut server, "EXMP-152").await;
    let create = mock_create(&mut server, 201).await.expect(0);
    let (source, target) = keys();

    let err = create_mirror(
        &client_for(&server),
        &source,
        &target,
        &labels(),
        &Settings::default(),
    )
    .await
    .unwrap_err();

    create.assert_async().await;
    assert!(matches!(err, MirrorError::SourceNotFound { .. }));
    assert!(err.orphan().is_none());
}

#[tokio::test]
async fn creation_failure_skips_linking() {
    let mut server = mockito::Server::new_async().await;
    mock_issue(&mut server, "EXMP-152", &source_issue(json!([]))).await;
    mock_create(&mut server, 400).await;
    let link = mock_link(&mut server, 201).await.expect(0);
    let (source, target) = keys();

    let err = create_mirror(
        &client_for(&server),
        &source,
        &target,
        &labels(),
        &Settings::default(),
    )
    .await
    .unwrap_err();

    link.assert_async().await;
    assert!(matches!(err, MirrorError::CreationFailed { .. }));
}

#[tokio::test]
async fn link_failure_leaves_orphan() {
    let mut server = mockito::Server::new_async().await;
    mock_issue(&mut server, "EXMP-152", &source_issue(json!([]))).await;
    mock_create(&mut server, 201).await;
    mock_link(&mut server, 500).await;
    let (source, target) = keys();

    let err = create_mirror(
        &client_for(&server),
        &source,
        &target,
        &labels(),
        &Settings::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MirrorError::LinkFailed { .. }));
    assert_eq!(err.orphan(), Some("DEV-201"));
}

#[tokio::test]
async fn link_type_comes_from_settings() {
    let mut server = mockito::Server::new_async().await;
    mock_issue(&mut server, "EXMP-152", &issue_json("EXMP-152", None, &[])).await;
    server
        .mock("POST", "/rest/api/2/issue")
        .match_body(Matcher::PartialJson(json!({
            "fields": { "issuetype": { "name": "Story" } }
        })))
        .with_status(201)
        .with_body(r#"{"id":"10202","key":"DEV-202"}"#)
        .create_async()
        .await;
    let link = server
        .mock("POST", "/rest/api/2/issueLink")
        .match_body(Matcher::PartialJson(json!({ "type": { "name": "Mirrors" } })))
        .with_status(201)
        .create_async()
        .await;
    let settings = Settings {
        issue_type: "Story".to_string(),
        link_type: "Mirrors".to_string(),
        ..Settings::default()
    };
    let (source, target) = keys();

    let outcome = create_mirror(&client_for(&server), &source, &target, &[], &settings)
        .await
        .unwrap();

    link.assert_async().await;
    assert_eq!(
        outcome,
        MirrorOutcome::Mirrored {
            key: "DEV-202".to_string()
        }
    );
}

#[tokio::test]
async fn mirror_linked_with_custom_relation_is_found_again() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server);
    let settings = Settings {
        link_type: "Cloners".to_string(),
        ..Settings::default()
    };
    let (source, target) = keys();

    let first_fetch = mock_issue(&mut server, "EXMP-152", &source_issue(json!([]))).await;
    let create = mock_create(&mut server, 201).await.expect(1);
    let link = server
        .mock("POST", "/rest/api/2/issueLink")
        .match_body(Matcher::PartialJson(json!({ "type": { "name": "Cloners" } })))
        .with_status(201)
        .create_async()
        .await;

    let first = create_mirror(&client, &source, &target, &labels(), &settings)
        .await
        .unwrap();
    assert_eq!(
        first,
        MirrorOutcome::Mirrored {
            key: "DEV-201".to_string()
        }
    );
    link.assert_async().await;
    first_fetch.remove_async().await;

    mock_issue(
        &mut server,
        "EXMP-152",
        &source_issue(json!([
            { "type": { "name": "Cloners" }, "outwardIssue": { "key": "DEV-201" } }
        ])),
    )
    .await;

    let second = create_mirror(&client, &source, &target, &labels(), &settings)
        .await
        .unwrap();

    create.assert_async().await;
    assert_eq!(
        second,
        MirrorOutcome::AlreadyMirrored {
            existing: "DEV-201".to_string()
        }
    );
}
