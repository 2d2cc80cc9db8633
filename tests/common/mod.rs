//! Shared testing utilities for pr-notifier CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads that must not leak in from the developer's shell.
const INHERITED_VARS: &[&str] = &[
    "GITHUB_EVENT_PATH",
    "GITHUB_OUTPUT",
    "GITHUB_API_URL",
    "GITHUB_SERVER_URL",
    "SLACK_API_URL",
    "PR_NOTIFIER_QUORUM",
    "SLACK_BOT_TOKEN",
    "SLACK_CHANNEL",
    "SLACK_CHANNEL_ID",
    "GH_TOKEN",
    "RUST_LOG",
];

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    github_url: Option<String>,
    slack_url: Option<String>,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root, github_url: None, slack_url: None }
    }

    /// Point the binary at mock GitHub and Slack servers.
    pub fn with_hosts(mut self, github_url: String, slack_url: String) -> Self {
        self.github_url = Some(github_url);
        self.slack_url = Some(slack_url);
        self
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write a webhook payload and return its path.
    pub fn write_event(&self, payload: &str) -> PathBuf {
        let path = self.root().join("event.json");
        fs::write(&path, payload).expect("Failed to write event payload");
        path
    }

    /// Write a settings file and return its path.
    pub fn write_settings(&self, content: &str) -> PathBuf {
        let path = self.root().join("notifier.toml");
        fs::write(&path, content).expect("Failed to write settings");
        path
    }

    /// Build a command with credentials set and nothing inherited.
    pub fn cli(&self) -> Command {
        let mut cmd = self.bare_cli();
        cmd.env("SLACK_BOT_TOKEN", "xoxb-test")
            .env("SLACK_CHANNEL", "#reviews")
            .env("SLACK_CHANNEL_ID", "C0123")
            .env("GH_TOKEN", "ghp-test");
        cmd
    }

    /// Build a command without credentials.
    pub fn bare_cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("pr-notifier").expect("Failed to locate pr-notifier binary");
        cmd.current_dir(self.root());
        for name in INHERITED_VARS {
            cmd.env_remove(name);
        }
        if let Some(url) = &self.github_url {
            cmd.env("GITHUB_API_URL", url);
        }
        if let Some(url) = &self.slack_url {
            cmd.env("SLACK_API_URL", url);
        }
        cmd
    }
}

/// A `pull_request` or `pull_request_review` payload for `org/repo#42`.
#[allow(dead_code)]
pub fn event_payload(action: &str, review_state: Option<&str>) -> String {
    let review = review_state
        .map(|state| format!(r#","review":{{"state":"{}"}}"#, state))
        .unwrap_or_default();
    format!(
        r#"{{"action":"{}","pull_request":{{"number":42,"title":"Fix bug","user":{{"login":"alice"}}}},"repository":{{"full_name":"org/repo"}}{}}}"#,
        action, review
    )
}
