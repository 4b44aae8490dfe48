//! Read-only HTTP views over the record store.
//!
//! HTML pages for people and JSON equivalents for scripts. Nothing here
//! writes to the store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::adapters::datetime::format_datetime;
use crate::domain::errors::StoreError;
use crate::domain::models::{Issue, Repository, WebConfig};
use crate::domain::ports::{RecordStore, RepositoryOrder};

use super::html;

/// Query parameters for the JSON listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryResponse {
    pub id: i64,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stars: i64,
    pub open_issues_count: i64,
    pub contributors_count: i64,
}

impl From<Repository> for RepositoryResponse {
    fn from(r: Repository) -> Self {
        Self {
            id: r.id,
            full_name: r.full_name,
            description: r.description,
            html_url: r.html_url,
            stars: r.stars,
            open_issues_count: r.open_issues_count,
            contributors_count: r.contributors_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueResponse {
    pub issue_number: i64,
    pub title: String,
    pub html_url: String,
    pub created_at: String,
}

impl From<Issue> for IssueResponse {
    fn from(i: Issue) -> Self {
        Self {
            issue_number: i.issue_number,
            title: i.title,
            html_url: i.html_url,
            created_at: format_datetime(&i.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryDetailResponse {
    #[serde(flatten)]
    pub repository: RepositoryResponse,
    pub issues: Vec<IssueResponse>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Failures a view can report.
#[derive(Debug)]
enum ViewError {
    BadRequest(String),
    NotFound(String),
    Store(StoreError),
}

impl From<StoreError> for ViewError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl ViewError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Store(_) => "The repository index could not be read".to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    fn log(&self) {
        if let Self::Store(e) = self {
            tracing::error!(error = %e, "Store read failed");
        }
    }

    fn into_html(self) -> Response {
        self.log();
        let status = self.status();
        let title = status.canonical_reason().unwrap_or("Error");
        (status, Html(html::render_error(title, &self.message()))).into_response()
    }

    fn into_json(self) -> Response {
        self.log();
        let body = ErrorResponse {
            error: self.message(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Parse a path id. Non-integers are a bad request; 0 never matches a row.
fn parse_id(raw: &str) -> Result<i64, ViewError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ViewError::BadRequest(format!("'{raw}' is not a repository id")))?;

    if id == 0 {
        return Err(ViewError::NotFound("Repository not found".to_string()));
    }
    Ok(id)
}

async fn load_detail<S: RecordStore>(
    store: &S,
    raw_id: &str,
) -> Result<(Repository, Vec<Issue>), ViewError> {
    let id = parse_id(raw_id)?;
    let repository = store
        .find_repository_by_id(id)
        .await?
        .ok_or_else(|| ViewError::NotFound(format!("Repository {id} not found")))?;
    let issues = store.find_issues_by_repository_id(repository.id).await?;
    Ok((repository, issues))
}

/// Shared state for the web server.
struct AppState<S: RecordStore> {
    store: Arc<S>,
}

/// Web server for the repository views.
pub struct WebServer<S: RecordStore + 'static> {
    config: WebConfig,
    store: Arc<S>,
}

impl<S: RecordStore + 'static> WebServer<S> {
    pub fn new(store: Arc<S>, config: WebConfig) -> Self {
        Self { config, store }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            store: Arc::clone(&self.store),
        });

        Router::new()
            .route("/", get(index::<S>))
            .route("/repositories", get(ranked::<S>))
            .route("/repositories/{id}", get(detail::<S>))
            .route("/api/repositories", get(api_list::<S>))
            .route("/api/repositories/{id}", get(api_detail::<S>))
            .route("/health", get(health_check))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    fn addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.config.host, self.config.port);
        raw.parse()
            .with_context(|| format!("Invalid listen address {raw}"))
    }

    /// Start the server.
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        tracing::info!(%addr, "Web server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Web server failed")?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn render_list<S: RecordStore + 'static>(
    state: &AppState<S>,
    title: &str,
    order: RepositoryOrder,
) -> Response {
    match state.store.list_repositories(order).await {
        Ok(repositories) => {
            Html(html::render_repository_list(title, &repositories)).into_response()
        }
        Err(e) => ViewError::from(e).into_html(),
    }
}

async fn index<S: RecordStore + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    render_list(&state, "Repositories", RepositoryOrder::Insertion).await
}

async fn ranked<S: RecordStore + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    render_list(&state, "Repositories by stars", RepositoryOrder::StarsDesc).await
}

async fn detail<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Response {
    match load_detail(state.store.as_ref(), &id).await {
        Ok((repository, issues)) => {
            Html(html::render_repository_detail(&repository, &issues)).into_response()
        }
        Err(e) => e.into_html(),
    }
}

async fn api_list<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListParams>,
) -> Response {
    let order = match params.order.as_deref() {
        None => RepositoryOrder::default(),
        Some(raw) => match RepositoryOrder::parse(raw) {
            Some(order) => order,
            None => {
                return ViewError::BadRequest(format!(
                    "Unknown order '{raw}'. Use 'stars' or 'insertion'"
                ))
                .into_json()
            }
        },
    };

    match state.store.list_repositories(order).await {
        Ok(repositories) => Json(
            repositories
                .into_iter()
                .map(RepositoryResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => ViewError::from(e).into_json(),
    }
}

async fn api_detail<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Response {
    match load_detail(state.store.as_ref(), &id).await {
        Ok((repository, issues)) => Json(RepositoryDetailResponse {
            repository: repository.into(),
            issues: issues.into_iter().map(IssueResponse::from).collect(),
        })
        .into_response(),
        Err(e) => e.into_json(),
    }
}
