//! `handle` command: the pull-request lifecycle coordinator.
//!
//! Each invocation reconstructs the PR's state from the correlation store:
//! nothing recorded means `NoMessage`, a live handle means `MessageActive`, and
//! only retired handles means `Resolved`. Resolution deletes the chat message
//! and retires the correlation so later deliveries become no-ops.

use serde::Serialize;
use tracing::{info, warn};

use crate::app::NotifierContext;
use crate::app::tally::count_approvals;
use crate::domain::{
    AppError, Correlation, CorrelationKey, EventKind, MessageHandle, PullRequestEvent, ReviewMessage,
};
use crate::ports::{ChatHost, CorrelationStore, ReviewHost};

/// What the coordinator did for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleAction {
    Posted,
    Updated,
    Deleted,
    Skipped,
}

/// Output of `handle`.
#[derive(Debug, Clone, Serialize)]
pub struct HandleOutput {
    pub schema_version: u32,
    pub repo: String,
    pub pr_number: u64,
    pub event: String,
    pub action: HandleAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approvals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
}

impl HandleOutput {
    fn new(event: &PullRequestEvent, action: HandleAction) -> Self {
        Self {
            schema_version: 1,
            repo: event.repo_id.clone(),
            pr_number: event.pr_number,
            event: event.kind.to_string(),
            action,
            approvals: None,
            message_handle: None,
            skipped_reason: None,
        }
    }

    fn skipped(event: &PullRequestEvent, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        info!(reason = %reason, "No action taken");
        Self { skipped_reason: Some(reason), ..Self::new(event, HandleAction::Skipped) }
    }

    fn with_handle(mut self, handle: &MessageHandle) -> Self {
        self.message_handle = Some(handle.to_string());
        self
    }

    fn with_approvals(mut self, approvals: u32) -> Self {
        self.approvals = Some(approvals);
        self
    }
}

/// Execute `handle` for one event.
pub fn execute<R, C, S>(
    ctx: &NotifierContext<R, C, S>,
    event: &PullRequestEvent,
) -> Result<HandleOutput, AppError>
where
    R: ReviewHost,
    C: ChatHost,
    S: CorrelationStore,
{
    match &event.kind {
        EventKind::Opened => on_opened(ctx, event),
        EventKind::ReviewSubmitted => on_review_submitted(ctx, event),
        EventKind::Closed => on_closed(ctx, event),
        EventKind::Other(action) => {
            Ok(HandleOutput::skipped(event, format!("no handling for action '{}'", action)))
        }
    }
}

fn on_opened<R, C, S>(
    ctx: &NotifierContext<R, C, S>,
    event: &PullRequestEvent,
) -> Result<HandleOutput, AppError>
where
    R: ReviewHost,
    C: ChatHost,
    S: CorrelationStore,
{
    let key = correlation_key(event);

    // Every lookup error propagates on open.
    match ctx.store().lookup(&key)? {
        Correlation::Live(existing) => {
            return Ok(HandleOutput::skipped(event, "message already posted").with_handle(&existing));
        }
        Correlation::Retired => return Ok(HandleOutput::skipped(event, "message already resolved")),
        Correlation::Absent => {}
    }

    let settings = ctx.settings();
    let text = ReviewMessage::for_event(event, &settings.web_url)?.render(0, settings.quorum);

    let handle = ctx.chat().post_message(&settings.post_channel, &text)?;
    info!(handle = %handle, "Posted review message");

    ctx.store().put(&key, &handle)?;
    info!(handle = %handle, "Recorded message handle");

    Ok(HandleOutput::new(event, HandleAction::Posted).with_handle(&handle).with_approvals(0))
}

fn on_review_submitted<R, C, S>(
    ctx: &NotifierContext<R, C, S>,
    event: &PullRequestEvent,
) -> Result<HandleOutput, AppError>
where
    R: ReviewHost,
    C: ChatHost,
    S: CorrelationStore,
{
    if !event.is_approval() {
        let state = event.review_state.as_deref().unwrap_or("none");
        return Ok(HandleOutput::skipped(event, format!("review state '{}' is not an approval", state)));
    }

    let key = correlation_key(event);
    let Some(handle) = find_live_handle(ctx, &key)? else {
        return Ok(HandleOutput::skipped(event, "no active message"));
    };

    let settings = ctx.settings();
    let approvals = count_approvals(ctx.review_host(), &event.repo_id, event.pr_number)?;
    info!(approvals, quorum = settings.quorum, "Counted approvals");

    if approvals >= settings.quorum {
        resolve(ctx, &key, &handle)?;
        return Ok(HandleOutput::new(event, HandleAction::Deleted)
            .with_handle(&handle)
            .with_approvals(approvals));
    }

    let text =
        ReviewMessage::for_event(event, &settings.web_url)?.render(approvals, settings.quorum);
    ctx.chat().update_message(&settings.edit_channel, &handle, &text)?;
    info!(handle = %handle, approvals, "Updated review message");

    Ok(HandleOutput::new(event, HandleAction::Updated).with_handle(&handle).with_approvals(approvals))
}

fn on_closed<R, C, S>(
    ctx: &NotifierContext<R, C, S>,
    event: &PullRequestEvent,
) -> Result<HandleOutput, AppError>
where
    R: ReviewHost,
    C: ChatHost,
    S: CorrelationStore,
{
    let key = correlation_key(event);
    let Some(handle) = find_live_handle(ctx, &key)? else {
        return Ok(HandleOutput::skipped(event, "no active message"));
    };

    resolve(ctx, &key, &handle)?;
    Ok(HandleOutput::new(event, HandleAction::Deleted).with_handle(&handle))
}

fn correlation_key(event: &PullRequestEvent) -> CorrelationKey {
    CorrelationKey::new(event.repo_id.clone(), event.pr_number)
}

/// Look up the live handle, treating an unreadable comment listing as "none".
fn find_live_handle<R, C, S>(
    ctx: &NotifierContext<R, C, S>,
    key: &CorrelationKey,
) -> Result<Option<MessageHandle>, AppError>
where
    R: ReviewHost,
    C: ChatHost,
    S: CorrelationStore,
{
    match ctx.store().get(key) {
        Err(error) if error.is_unexpected_response() => {
            warn!(correlation = %key, error = %error, "Unreadable correlation lookup; assuming no active message");
            Ok(None)
        }
        other => other,
    }
}

/// Delete the chat message and retire its correlation.
fn resolve<R, C, S>(
    ctx: &NotifierContext<R, C, S>,
    key: &CorrelationKey,
    handle: &MessageHandle,
) -> Result<(), AppError>
where
    R: ReviewHost,
    C: ChatHost,
    S: CorrelationStore,
{
    match ctx.chat().delete_message(&ctx.settings().edit_channel, handle) {
        Ok(()) => info!(handle = %handle, "Deleted review message"),
        Err(error) if error.is_message_not_found() => {
            info!(handle = %handle, "Review message already deleted");
        }
        Err(error) => return Err(error),
    }

    if let Err(error) = ctx.store().retire(key, handle) {
        warn!(correlation = %key, error = %error, "Failed to retire correlation");
    }
    Ok(())
}
