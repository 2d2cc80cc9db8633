//! `preview` command: render the chat message for an event without side effects.

use serde::Serialize;
use url::Url;

use crate::domain::{AppError, PullRequestEvent, ReviewMessage};

/// Options for `preview`.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub approvals: u32,
    pub quorum: u32,
    pub web_url: Url,
}

/// Output of `preview`.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewOutput {
    pub schema_version: u32,
    pub repo: String,
    pub pr_number: u64,
    pub event: String,
    pub approvals: u32,
    pub quorum: u32,
    /// Whether this approval count would remove the message.
    pub resolved: bool,
    pub text: String,
}

pub fn execute(
    event: &PullRequestEvent,
    options: &PreviewOptions,
) -> Result<PreviewOutput, AppError> {
    let message = ReviewMessage::for_event(event, &options.web_url)?;
    Ok(PreviewOutput {
        schema_version: 1,
        repo: event.repo_id.clone(),
        pr_number: event.pr_number,
        event: event.kind.to_string(),
        approvals: options.approvals,
        quorum: options.quorum,
        resolved: options.approvals >= options.quorum,
        text: message.render(options.approvals, options.quorum),
    })
}
