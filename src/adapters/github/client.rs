//! GitHub HTTP client.
//!
//! Wraps the three GitHub REST API v3 endpoints the indexer reads: repository
//! search, contributor listing and issue listing. Requests are sent one at a
//! time with no retry or backoff.

use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};

use crate::domain::errors::{ConfigurationError, FetchError};
use crate::domain::models::{GitHubConfig, RawIssue, RawRepository};
use crate::domain::ports::RepositorySource;

use super::link;
use super::models::{GitHubIssue, GitHubSearchResponse};

/// GitHub rejects `per_page` values above this.
pub const MAX_PER_PAGE: usize = 100;

/// Configuration for the GitHub HTTP client
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// Personal access token; requests are unauthenticated when `None`
    pub token: Option<String>,

    /// Base URL for the GitHub API
    pub base_url: String,

    /// `User-Agent` header value (GitHub requires one)
    pub user_agent: String,

    /// Search page size, clamped to 1..=100
    pub per_page: usize,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self::from(&GitHubConfig::default())
    }
}

impl From<&GitHubConfig> for GitHubClientConfig {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            token: config.token.clone(),
            base_url: config.api_base_url.clone(),
            user_agent: config.user_agent.clone(),
            per_page: config.per_page,
        }
    }
}

/// HTTP client for the GitHub REST API v3.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// Token sent as `Authorization: Bearer`.
    token: Option<String>,
    base_url: String,
    user_agent: String,
    per_page: usize,
}

impl GitHubClient {
    /// Create a client. A missing or empty token is logged as a warning; the
    /// first rejected request is what eventually fails.
    pub fn new(config: GitHubClientConfig) -> Self {
        let token = config.token.filter(|t| !t.trim().is_empty());
        if token.is_none() {
            tracing::warn!(error = %ConfigurationError::MissingToken, "GitHub token missing");
        }

        Self {
            http: Client::new(),
            token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent,
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, FetchError> {
        let base = format!("{}{}", self.base_url, path);
        Url::parse_with_params(&base, params).map_err(|e| FetchError::InvalidUrl {
            url: base,
            reason: e.to_string(),
        })
    }

    /// Build an authorized GET and send it.
    async fn get(&self, url: Url) -> Result<Response, reqwest::Error> {
        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header(header::USER_AGENT, &self.user_agent);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request.send().await
    }

    /// Search repositories whose name matches `keyword`, most starred first.
    ///
    /// Pages are requested until `max_results` items are collected or a page
    /// comes back short.
    pub async fn search_repositories(
        &self,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<RawRepository>, FetchError> {
        let mut repositories = Vec::new();
        let mut page = 1usize;

        while repositories.len() < max_results {
            let params = [
                ("q", format!("{keyword} in:name")),
                ("sort", "stars".to_string()),
                ("order", "desc".to_string()),
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ];
            let url = self.endpoint("/search/repositories", &params)?;
            let url_str = url.to_string();

            tracing::debug!(page, url = %url_str, "Fetching repository search page");

            let response = self.get(url).await.map_err(|source| FetchError::Transport {
                url: url_str.clone(),
                source,
            })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(FetchError::Status {
                    url: url_str,
                    status: status.as_u16(),
                    body,
                });
            }

            let result: GitHubSearchResponse =
                response
                    .json()
                    .await
                    .map_err(|source| FetchError::Decode {
                        url: url_str.clone(),
                        source,
                    })?;

            let received = result.items.len();
            repositories.extend(result.items.into_iter().map(RawRepository::from));

            if received < self.per_page {
                break;
            }
            page += 1;
        }

        repositories.truncate(max_results);

        tracing::info!(
            keyword,
            pages = page,
            fetched = repositories.len(),
            "Fetched repositories from GitHub"
        );

        Ok(repositories)
    }

    /// Approximate contributor count for `owner/repo`.
    ///
    /// Requests one contributor per page and reads the page count from the
    /// `rel="last"` link. Without that link the body holds every contributor
    /// (zero or one). Any failure yields 0.
    pub async fn contributors_count(&self, owner: &str, repo: &str) -> i64 {
        let params = [("per_page", "1".to_string()), ("anon", "true".to_string())];
        let Ok(url) = self.endpoint(&format!("/repos/{owner}/{repo}/contributors"), &params) else {
            return 0;
        };

        let response = match self.get(url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(owner, repo, error = %e, "Contributor request failed");
                return 0;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                owner,
                repo,
                status = response.status().as_u16(),
                "Contributor request rejected"
            );
            return 0;
        }

        let last_page = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(link::last_page);

        if let Some(count) = last_page {
            return count;
        }

        // 204 No Content for empty repositories has no body to decode
        match response.json::<Vec<serde_json::Value>>().await {
            Ok(contributors) => i64::try_from(contributors.len()).unwrap_or(0),
            Err(_) => 0,
        }
    }

    /// At most `limit` open issues for `owner/repo`, newest first. Pull
    /// requests are dropped. Any failure yields an empty list.
    pub async fn recent_open_issues(&self, owner: &str, repo: &str, limit: usize) -> Vec<RawIssue> {
        if limit == 0 {
            return Vec::new();
        }

        let params = [
            ("state", "open".to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", limit.min(MAX_PER_PAGE).to_string()),
        ];
        let Ok(url) = self.endpoint(&format!("/repos/{owner}/{repo}/issues"), &params) else {
            return Vec::new();
        };

        let response = match self.get(url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(owner, repo, error = %e, "Issue request failed");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                owner,
                repo,
                status = response.status().as_u16(),
                "Issue request rejected"
            );
            return Vec::new();
        }

        match response.json::<Vec<GitHubIssue>>().await {
            Ok(issues) => issues
                .into_iter()
                .filter(|issue| !issue.is_pull_request())
                .take(limit)
                .map(RawIssue::from)
                .collect(),
            Err(e) => {
                tracing::warn!(owner, repo, error = %e, "Issue response could not be decoded");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_repositories(
        &self,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<RawRepository>, FetchError> {
        self.search_repositories(keyword, max_results).await
    }

    async fn fetch_contributors_count(&self, owner: &str, repo_name: &str) -> i64 {
        self.contributors_count(owner, repo_name).await
    }

    async fn fetch_recent_open_issues(
        &self,
        owner: &str,
        repo_name: &str,
        limit: usize,
    ) -> Vec<RawIssue> {
        self.recent_open_issues(owner, repo_name, limit).await
    }
}
