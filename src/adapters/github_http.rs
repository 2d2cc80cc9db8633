//! GitHub REST client implementing the review host port.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, LINK, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{AppError, GitHubSettings, HttpSettings};
use crate::ports::{PrComment, Review, ReviewHost};

const HOST: &str = "GitHub";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = "pr-notifier";
const PER_PAGE: &str = "100";
// Upper bound on followed `next` links.
const MAX_PAGES: usize = 50;

/// HTTP transport for the GitHub REST API.
#[derive(Clone)]
pub struct GitHubHttpClient {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for GitHubHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubHttpClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GitHubHttpClient {
    pub fn new(
        token: String,
        github: &GitHubSettings,
        http: &HttpSettings,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .map_err(|e| AppError::Transport {
                host: HOST,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { token, api_url: github.api_url.clone(), client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.api_url.join(path).map_err(|e| AppError::Transport {
            host: HOST,
            message: format!("Invalid endpoint '{}': {}", path, e),
        })
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Response, AppError> {
        let response = request
            .bearer_auth(&self.token)
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .map_err(|e| AppError::Transport {
                host: HOST,
                message: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        });
        Err(AppError::ReviewHostApi { status: status.as_u16(), message })
    }

    /// GET a list endpoint, following `rel="next"` links.
    ///
    /// A listing still paginating after [`MAX_PAGES`] pages is an error rather than a partial result.
    fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair("per_page", PER_PAGE);

        let mut items = Vec::new();
        let mut next = Some(url);
        let mut pages = 0;

        while let Some(url) = next.take() {
            pages += 1;
            debug!(%url, page = pages, "GitHub GET");
            let response = self.send(self.client.get(url))?;
            next = next_page_url(response.headers());

            let body = response.text().map_err(|e| AppError::Transport {
                host: HOST,
                message: format!("Failed to read response: {}", e),
            })?;
            items.extend(parse_sequence::<T>(&body)?);

            if pages >= MAX_PAGES && next.is_some() {
                warn!(path, pages, "GitHub listing exceeds page limit");
                return Err(AppError::UnexpectedResponse {
                    host: HOST,
                    details: format!("{} has more than {} pages", path, MAX_PAGES),
                });
            }
        }

        Ok(items)
    }
}

impl ReviewHost for GitHubHttpClient {
    fn list_reviews(&self, repo_id: &str, pr_number: u64) -> Result<Vec<Review>, AppError> {
        self.get_all(&format!("repos/{}/pulls/{}/reviews", repo_id, pr_number))
    }

    fn list_pr_comments(&self, repo_id: &str, pr_number: u64) -> Result<Vec<PrComment>, AppError> {
        self.get_all(&format!("repos/{}/issues/{}/comments", repo_id, pr_number))
    }

    fn create_pr_comment(
        &self,
        repo_id: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<u64, AppError> {
        let url = self.endpoint(&format!("repos/{}/issues/{}/comments", repo_id, pr_number))?;
        let response = self.send(self.client.post(url).json(&serde_json::json!({ "body": body })))?;

        let created: CreatedComment = response.json().map_err(|e| AppError::UnexpectedResponse {
            host: HOST,
            details: format!("Failed to parse created comment: {}", e),
        })?;
        Ok(created.id)
    }
}

#[derive(Debug, Deserialize)]
struct CreatedComment {
    id: u64,
}

/// Decode a JSON array body, rejecting any other shape.
fn parse_sequence<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, AppError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AppError::UnexpectedResponse {
            host: HOST,
            details: format!("Failed to parse response: {}", e),
        })?;

    if !value.is_array() {
        return Err(AppError::UnexpectedResponse {
            host: HOST,
            details: "expected a JSON array".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| AppError::UnexpectedResponse {
        host: HOST,
        details: format!("Failed to decode list items: {}", e),
    })
}

fn next_page_url(headers: &HeaderMap) -> Option<Url> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == r#"rel="next""#) {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}
