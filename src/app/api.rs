//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together configuration,
//! adapter construction, and command execution.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{error, info_span};

use crate::adapters::{
    CommentCorrelationStore, FileCorrelationStore, GitHubHttpClient, SlackHttpClient,
};
use crate::app::commands::{handle, preview};
use crate::app::config::{self, env_lookup};
use crate::app::{CoordinatorSettings, NotifierContext};
use crate::domain::{NotifierConfig, NotifierSettings, StoreBackend};
use crate::ports::CorrelationStore;

pub use crate::app::commands::handle::{HandleAction, HandleOutput};
pub use crate::app::commands::preview::{PreviewOptions, PreviewOutput};
pub use crate::domain::{AppError, PullRequestEvent};

/// Load configuration from the environment and an optional settings file.
pub fn load_config(settings_path: Option<&Path>) -> Result<NotifierConfig, AppError> {
    config::load_config(settings_path, env_lookup)
}

/// Load only the non-secret settings.
pub fn load_settings(settings_path: Option<&Path>) -> Result<NotifierSettings, AppError> {
    config::load_settings(settings_path, env_lookup)
}

/// Read and parse the webhook payload at `path`.
pub fn read_event(path: &Path) -> Result<PullRequestEvent, AppError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            AppError::config_error(format!("Event file not found: {}", path.display()))
        }
        _ => AppError::Io(e),
    })?;
    PullRequestEvent::from_json(&content)
}

/// Handle one pull-request event against the live GitHub and Slack APIs.
pub fn handle_event(
    config: &NotifierConfig,
    event: &PullRequestEvent,
) -> Result<HandleOutput, AppError> {
    let span = info_span!(
        "handle_event",
        kind = %event.kind,
        pr_number = event.pr_number,
        repo = %event.repo_id
    );
    let _guard = span.enter();

    let result = run_handle(config, event);
    if let Err(err) = &result {
        error!(kind = %event.kind, pr_number = event.pr_number, error = %err, "Event handling failed");
    }
    result
}

fn run_handle(
    config: &NotifierConfig,
    event: &PullRequestEvent,
) -> Result<HandleOutput, AppError> {
    let settings = &config.settings;
    let credentials = &config.credentials;

    let github =
        GitHubHttpClient::new(credentials.github_token.clone(), &settings.github, &settings.http)?;
    let slack =
        SlackHttpClient::new(credentials.slack_bot_token.clone(), &settings.slack, &settings.http)?;

    let store: Box<dyn CorrelationStore + '_> = match settings.store.backend {
        StoreBackend::Comments => Box::new(CommentCorrelationStore::new(&github)),
        StoreBackend::File => {
            let path = settings.store.path.as_deref().ok_or_else(|| {
                AppError::config_error("store.path is required for the file backend")
            })?;
            Box::new(FileCorrelationStore::new(path))
        }
    };

    let ctx = NotifierContext::new(&github, slack, store, CoordinatorSettings::from_config(config));
    handle::execute(&ctx, event)
}

/// Render the message an event would produce at `approvals` approvals.
pub fn preview(
    settings: &NotifierSettings,
    event: &PullRequestEvent,
    approvals: u32,
) -> Result<PreviewOutput, AppError> {
    let options = PreviewOptions {
        approvals,
        quorum: settings.review.quorum,
        web_url: settings.github.web_url.clone(),
    };
    preview::execute(event, &options)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn read_event_reports_missing_file() {
        let err = read_event(Path::new("/nonexistent/event.json")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("not found")));
    }

    #[test]
    fn read_event_rejects_payload_without_number() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(
            &path,
            r#"{"action":"opened","pull_request":{"title":"t"},"repository":{"full_name":"o/r"}}"#,
        )
        .unwrap();

        assert!(matches!(read_event(&path), Err(AppError::MalformedEvent(_))));
    }

    #[test]
    fn preview_uses_settings_quorum() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(
            &path,
            r#"{"action":"opened","pull_request":{"number":3,"title":"Tidy","user":{"login":"eve"}},"repository":{"full_name":"o/r"}}"#,
        )
        .unwrap();
        let event = read_event(&path).unwrap();
        let mut settings = NotifierSettings::default();
        settings.review.quorum = 3;

        let out = preview(&settings, &event, 1).unwrap();
        assert!(out.text.starts_with("(1 of 3 approvals) PR #3 by eve:"));
    }
}
