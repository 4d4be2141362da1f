use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

use super::{Comment, PullRequestRef, PullRequestSource};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("qa-report/", env!("CARGO_PKG_VERSION"));
const COMMENTS_PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct GhUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GhComment {
    body: Option<String>,
    user: Option<GhUser>,
}

/// Abstraction over GitHub REST calls for testability.
pub trait GitHubClient: Send {
    /// GET `path` (relative to the API root) and return the decoded JSON.
    fn get(&self, path: &str) -> Result<serde_json::Value>;

    /// POST a JSON body to `path` and return the decoded JSON response.
    fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value>;
}

/// Real client backed by `ureq`. No retries: every failure is reported as-is.
struct DefaultGitHubClient {
    api_url: String,
    token: String,
}

impl DefaultGitHubClient {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url.trim_end_matches('/'))
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        ureq::request(method, &self.url(path))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION)
            .set("User-Agent", USER_AGENT)
    }
}

impl GitHubClient for DefaultGitHubClient {
    fn get(&self, path: &str) -> Result<serde_json::Value> {
        debug!(path, "GET");
        let response = self.request("GET", path).call().map_err(api_error)?;
        response
            .into_json()
            .map_err(|e| Error::Api(format!("failed to parse GitHub response: {e}")))
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        debug!(path, "POST");
        let response = self
            .request("POST", path)
            .send_json(body)
            .map_err(api_error)?;
        response
            .into_json()
            .map_err(|e| Error::Api(format!("failed to parse GitHub response: {e}")))
    }
}

fn api_error(err: ureq::Error) -> Error {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            Error::Api(format!("HTTP {code}: {}", extract_message(&body)))
        }
        ureq::Error::Transport(t) => Error::Api(format!("request failed: {t}")),
    }
}

/// Pull the `message` field out of a GitHub error payload, falling back to the raw body.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

pub struct GitHubSource {
    client: Box<dyn GitHubClient>,
}

impl GitHubSource {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Box::new(DefaultGitHubClient {
                api_url: config.api_url.clone(),
                token: config.token.clone(),
            }),
        }
    }

    pub fn with_client(client: Box<dyn GitHubClient>) -> Self {
        Self { client }
    }

    fn issue_path(pr: &PullRequestRef) -> String {
        format!("/repos/{}/{}/issues/{}", pr.owner, pr.repo, pr.number)
    }

    fn parse_comment(gh: GhComment) -> Comment {
        Comment {
            body: gh.body.unwrap_or_default(),
            author: gh
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

impl PullRequestSource for GitHubSource {
    fn list_comments(&self, pr: &PullRequestRef) -> Result<Vec<Comment>> {
        let path = format!(
            "{}/comments?per_page={COMMENTS_PER_PAGE}",
            Self::issue_path(pr)
        );
        let json = self.client.get(&path)?;
        let comments: Vec<GhComment> = serde_json::from_value(json)
            .map_err(|e| Error::Api(format!("failed to parse comments: {e}")))?;
        debug!(count = comments.len(), pr = %pr, "fetched comments");
        Ok(comments.into_iter().map(Self::parse_comment).collect())
    }

    fn add_label(&self, pr: &PullRequestRef, label: &str) -> Result<()> {
        let path = format!("{}/labels", Self::issue_path(pr));
        self.client
            .post(&path, serde_json::json!({ "labels": [label] }))?;
        Ok(())
    }
}
