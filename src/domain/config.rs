//! Notifier configuration domain models.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Environment variables holding secrets and channel identifiers.
pub const SLACK_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
pub const SLACK_CHANNEL: &str = "SLACK_CHANNEL";
pub const SLACK_CHANNEL_ID: &str = "SLACK_CHANNEL_ID";
pub const GH_TOKEN: &str = "GH_TOKEN";

/// Environment overrides for non-secret settings.
pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const GITHUB_SERVER_URL: &str = "GITHUB_SERVER_URL";
pub const SLACK_API_URL: &str = "SLACK_API_URL";
pub const QUORUM_OVERRIDE: &str = "PR_NOTIFIER_QUORUM";

/// Full configuration for one invocation.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub settings: NotifierSettings,
    pub credentials: Credentials,
}

/// Secrets and channel identifiers read from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub slack_bot_token: String,
    /// Channel name used when posting.
    pub slack_channel: String,
    /// Channel ID used for update and delete.
    pub slack_channel_id: String,
    pub github_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("slack_bot_token", &"[REDACTED]")
            .field("slack_channel", &self.slack_channel)
            .field("slack_channel_id", &self.slack_channel_id)
            .field("github_token", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Read all required values through `lookup`, reporting every missing name at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name).filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => {
                missing.push(name);
                String::new()
            }
        };

        let credentials = Self {
            slack_bot_token: read(SLACK_BOT_TOKEN),
            slack_channel: read(SLACK_CHANNEL),
            slack_channel_id: read(SLACK_CHANNEL_ID),
            github_token: read(GH_TOKEN),
        };

        if !missing.is_empty() {
            return Err(AppError::config_error(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }
        Ok(credentials)
    }
}

/// Non-secret settings, optionally loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierSettings {
    #[serde(default)]
    pub review: ReviewSettings,
    #[serde(default)]
    pub github: GitHubSettings,
    #[serde(default)]
    pub slack: SlackSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub store: StoreSettings,
}

impl NotifierSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        self.review.validate()?;
        self.http.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(raw) = value(GITHUB_API_URL) {
            self.github.api_url = parse_base_url(GITHUB_API_URL, &raw)?;
        }
        if let Some(raw) = value(GITHUB_SERVER_URL) {
            self.github.web_url = parse_base_url(GITHUB_SERVER_URL, &raw)?;
        }
        if let Some(raw) = value(SLACK_API_URL) {
            self.slack.api_url = parse_base_url(SLACK_API_URL, &raw)?;
        }
        if let Some(raw) = value(QUORUM_OVERRIDE) {
            self.review.quorum = raw.trim().parse().map_err(|_| {
                AppError::config_error(format!("{} must be a positive integer", QUORUM_OVERRIDE))
            })?;
        }
        Ok(())
    }

    /// Ensure every base URL ends with a slash so relative joins keep their path.
    pub fn normalize(&mut self) {
        for url in [&mut self.github.api_url, &mut self.github.web_url, &mut self.slack.api_url] {
            ensure_trailing_slash(url);
        }
    }
}

/// Review quorum settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewSettings {
    /// Approvals required before the chat message is removed.
    #[serde(default = "default_quorum")]
    pub quorum: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self { quorum: default_quorum() }
    }
}

impl ReviewSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.quorum == 0 {
            return Err(AppError::config_error("quorum must be greater than 0"));
        }
        Ok(())
    }
}

/// GitHub endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubSettings {
    /// REST API base URL.
    #[serde(default = "default_github_api_url")]
    pub api_url: Url,
    /// Web base URL used for PR links.
    #[serde(default = "default_github_web_url")]
    pub web_url: Url,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self { api_url: default_github_api_url(), web_url: default_github_web_url() }
    }
}

/// Slack endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlackSettings {
    /// Web API base URL.
    #[serde(default = "default_slack_api_url")]
    pub api_url: Url,
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self { api_url: default_slack_api_url() }
    }
}

/// HTTP client settings shared by both hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: default_timeout() }
    }
}

impl HttpSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

/// Where correlations are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Tagged comments on the pull request itself.
    #[default]
    Comments,
    /// Local JSON file.
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Path of the JSON file for the `file` backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.backend == StoreBackend::File && self.path.is_none() {
            return Err(AppError::config_error("store.path is required for the file backend"));
        }
        Ok(())
    }
}

fn parse_base_url(name: &str, raw: &str) -> Result<Url, AppError> {
    Url::parse(raw.trim())
        .map_err(|e| AppError::config_error(format!("{} is not a valid URL: {}", name, e)))
}

fn ensure_trailing_slash(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}

fn default_quorum() -> u32 {
    2
}

fn default_github_api_url() -> Url {
    Url::parse("https://api.github.com/").expect("Default GitHub API URL must be valid")
}

fn default_github_web_url() -> Url {
    Url::parse("https://github.com/").expect("Default GitHub web URL must be valid")
}

fn default_slack_api_url() -> Url {
    Url::parse("https://slack.com/api/").expect("Default Slack API URL must be valid")
}

fn default_timeout() -> u64 {
    10
}
