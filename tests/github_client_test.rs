//! GitHub client against a mock API server.

mod common;

use std::sync::Arc;

use repodex::adapters::github::{GitHubClient, GitHubClientConfig};
use repodex::domain::ports::RepositorySource;
use repodex::services::{Reconciler, SyncSource};
use repodex::{FetchError, RecordStore, RepositoryOrder};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer, per_page: usize) -> GitHubClient {
    GitHubClient::new(GitHubClientConfig {
        token: Some("ghp_test".to_string()),
        base_url: server.uri(),
        user_agent: "repodex-test".to_string(),
        per_page,
    })
}

fn search_item(n: usize) -> Value {
    json!({
        "id": n,
        "full_name": format!("owner{n}/json-{n}"),
        "description": format!("Repository number {n}"),
        "html_url": format!("https://github.com/owner{n}/json-{n}"),
        "stargazers_count": 1000 - n,
        "open_issues_count": n,
    })
}

fn search_page(range: std::ops::Range<usize>) -> ResponseTemplate {
    let items: Vec<Value> = range.map(search_item).collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "total_count": 1000,
        "incomplete_results": false,
        "items": items,
    }))
}

async fn mount_search_page(server: &MockServer, page: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "json in:name"))
        .and(query_param("sort", "stars"))
        .and(query_param("order", "desc"))
        .and(query_param("page", page))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_paginates_until_partial_page() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", search_page(0..2)).await;
    mount_search_page(&server, "2", search_page(2..4)).await;
    mount_search_page(&server, "3", search_page(4..5)).await;

    let repos = client(&server, 2).fetch_repositories("json", 10).await.unwrap();

    assert_eq!(repos.len(), 5);
    assert_eq!(repos[0].full_name, "owner0/json-0");
    assert_eq!(repos[4].full_name, "owner4/json-4");
    assert_eq!(repos[4].stars, 996);
    assert_eq!(repos[0].contributors_count, None);
}

#[tokio::test]
async fn test_search_truncates_to_max_results() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", search_page(0..3)).await;
    mount_search_page(&server, "2", search_page(3..6)).await;

    let repos = client(&server, 3).fetch_repositories("json", 4).await.unwrap();

    assert_eq!(repos.len(), 4);
    assert_eq!(repos[3].full_name, "owner3/json-3");
}

#[tokio::test]
async fn test_search_sends_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("per_page", "100"))
        .respond_with(search_page(0..1))
        .expect(1)
        .mount(&server)
        .await;

    let repos = client(&server, 500).fetch_repositories("json", 200).await.unwrap();
    assert_eq!(repos.len(), 1);
}

#[tokio::test]
async fn test_search_error_status_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API rate limit exceeded"))
        .mount(&server)
        .await;

    let err = client(&server, 100)
        .fetch_repositories("json", 200)
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body, "API rate limit exceeded");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_undecodable_body_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client(&server, 100).fetch_repositories("json", 200).await;
    assert!(matches!(result, Err(FetchError::Decode { .. })));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let client = GitHubClient::new(GitHubClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..GitHubClientConfig::default()
    });

    let result = client.fetch_repositories("json", 10).await;
    assert!(matches!(result, Err(FetchError::Transport { .. })));
}

#[tokio::test]
async fn test_request_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(header("authorization", "Bearer ghp_test"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .and(header("user-agent", "repodex-test"))
        .respond_with(search_page(0..1))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, 100).fetch_repositories("json", 1).await.unwrap();
}

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(search_page(0..1))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(GitHubClientConfig {
        token: None,
        base_url: server.uri(),
        ..GitHubClientConfig::default()
    });
    assert!(!client.is_authenticated());

    let repos = client.fetch_repositories("json", 1).await.unwrap();
    assert_eq!(repos.len(), 1);
}

#[tokio::test]
async fn test_contributors_count_from_link_header() {
    let server = MockServer::start().await;
    let link = format!(
        "<{0}/repositories/1/contributors?per_page=1&anon=true&page=2>; rel=\"next\", \
         <{0}/repositories/1/contributors?per_page=1&anon=true&page=57>; rel=\"last\"",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/repos/serde-rs/json/contributors"))
        .and(query_param("per_page", "1"))
        .and(query_param("anon", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", link.as_str())
                .set_body_json(json!([{ "login": "dtolnay", "contributions": 900 }])),
        )
        .mount(&server)
        .await;

    let count = client(&server, 100).fetch_contributors_count("serde-rs", "json").await;
    assert_eq!(count, 57);
}

#[tokio::test]
async fn test_contributors_count_without_link_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/solo/tool/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "login": "solo" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/empty/repo/contributors"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client(&server, 100);
    assert_eq!(client.fetch_contributors_count("solo", "tool").await, 1);
    assert_eq!(client.fetch_contributors_count("empty", "repo").await, 0);
}

#[tokio::test]
async fn test_contributors_failure_yields_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/gone/repo/contributors"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    assert_eq!(client(&server, 100).fetch_contributors_count("gone", "repo").await, 0);
}

fn issue_json(number: i64, created_at: &str, pull_request: bool) -> Value {
    let mut issue = json!({
        "number": number,
        "title": format!("Issue {number}"),
        "html_url": format!("https://github.com/serde-rs/json/issues/{number}"),
        "state": "open",
        "created_at": created_at,
    });
    if pull_request {
        issue["pull_request"] = json!({ "url": format!("https://api.github.com/repos/serde-rs/json/pulls/{number}") });
    }
    issue
}

#[tokio::test]
async fn test_recent_issues_filters_pull_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/serde-rs/json/issues"))
        .and(query_param("state", "open"))
        .and(query_param("sort", "created"))
        .and(query_param("direction", "desc"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            issue_json(12, "2024-03-03T00:00:00Z", false),
            issue_json(11, "2024-03-02T00:00:00Z", true),
            issue_json(10, "2024-03-01T00:00:00Z", false),
        ])))
        .mount(&server)
        .await;

    let issues = client(&server, 100)
        .fetch_recent_open_issues("serde-rs", "json", 5)
        .await;

    let numbers: Vec<i64> = issues.iter().map(|i| i.issue_number).collect();
    assert_eq!(numbers, vec![12, 10]);
    assert_eq!(issues[0].created_at.to_rfc3339(), "2024-03-03T00:00:00+00:00");
}

#[tokio::test]
async fn test_recent_issues_failure_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/serde-rs/json/issues"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server, 100);
    assert!(client.fetch_recent_open_issues("serde-rs", "json", 5).await.is_empty());
    assert!(client.fetch_recent_open_issues("serde-rs", "json", 0).await.is_empty());
}

#[tokio::test]
async fn test_remote_sync_end_to_end() {
    common::setup_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "items": [{
                "full_name": "serde-rs/json",
                "description": "Strongly typed JSON library for Rust",
                "html_url": "https://github.com/serde-rs/json",
                "stargazers_count": 4500,
                "open_issues_count": 50
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/serde-rs/json/contributors"))
        .respond_with(ResponseTemplate::new(200).insert_header(
            "link",
            "<https://api.github.com/repositories/1/contributors?per_page=1&page=180>; rel=\"last\"",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/serde-rs/json/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            issue_json(2, "2024-03-02T00:00:00Z", false),
            issue_json(1, "2024-03-01T00:00:00Z", false),
        ])))
        .mount(&server)
        .await;

    let store = common::test_store().await;
    let report = Reconciler::new(Arc::clone(&store))
        .sync(SyncSource::Remote(Arc::new(client(&server, 100))))
        .await
        .unwrap();

    assert_eq!(report.inserted, 1);
    assert_eq!(report.issues_written, 2);

    let repos = store.list_repositories(RepositoryOrder::StarsDesc).await.unwrap();
    assert_eq!(repos[0].full_name, "serde-rs/json");
    assert_eq!(repos[0].contributors_count, 180);
    assert_eq!(repos[0].open_issues_count, 50);

    let issues = store.find_issues_by_repository_id(repos[0].id).await.unwrap();
    assert_eq!(issues.iter().map(|i| i.issue_number).collect::<Vec<_>>(), vec![2, 1]);
}
