//! Pull-request webhook event model.

use std::fmt;

use serde::Deserialize;

use crate::domain::AppError;

/// Review state value carried by `pull_request_review` webhooks for approvals.
pub const APPROVED_EVENT_STATE: &str = "approved";

/// Kind of pull-request event driving one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Opened,
    ReviewSubmitted,
    Closed,
    /// Any other action, kept verbatim for logging.
    Other(String),
}

impl EventKind {
    fn from_action(action: &str, has_review: bool) -> Self {
        match action {
            "opened" => EventKind::Opened,
            "submitted" if has_review => EventKind::ReviewSubmitted,
            "closed" => EventKind::Closed,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventKind::Opened => "opened",
            EventKind::ReviewSubmitted => "review_submitted",
            EventKind::Closed => "closed",
            EventKind::Other(action) => action,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One inbound pull-request event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub kind: EventKind,
    pub pr_number: u64,
    pub pr_author: String,
    pub pr_title: String,
    /// Repository in `owner/name` form.
    pub repo_id: String,
    /// Present only for review submissions.
    pub review_state: Option<String>,
}

impl PullRequestEvent {
    /// Parse a webhook payload.
    ///
    /// The PR number and repository name are required; author and title fall
    /// back to empty strings since they only feed message text.
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        let payload: EventPayload = serde_json::from_str(content)
            .map_err(|e| AppError::MalformedEvent(format!("invalid JSON: {}", e)))?;
        Self::from_payload(payload)
    }

    fn from_payload(payload: EventPayload) -> Result<Self, AppError> {
        let pull_request = payload
            .pull_request
            .ok_or_else(|| AppError::MalformedEvent("missing pull_request".into()))?;

        let pr_number = match pull_request.number {
            Some(number) if number > 0 => number,
            Some(_) => {
                return Err(AppError::MalformedEvent("pull_request.number must be positive".into()));
            }
            None => return Err(AppError::MalformedEvent("missing pull_request.number".into())),
        };

        let repo_id = payload
            .repository
            .and_then(|repo| repo.full_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::MalformedEvent("missing repository.full_name".into()))?;

        let review_state = payload.review.as_ref().and_then(|review| review.state.clone());
        let action = payload.action.unwrap_or_default();

        Ok(Self {
            kind: EventKind::from_action(&action, payload.review.is_some()),
            pr_number,
            pr_author: pull_request.user.and_then(|user| user.login).unwrap_or_default(),
            pr_title: pull_request.title.unwrap_or_default(),
            repo_id,
            review_state,
        })
    }

    /// Whether this is a review submission carrying an approval.
    pub fn is_approval(&self) -> bool {
        self.kind == EventKind::ReviewSubmitted
            && self.review_state.as_deref() == Some(APPROVED_EVENT_STATE)
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    repository: Option<RepositoryPayload>,
    #[serde(default)]
    review: Option<ReviewPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    user: Option<UserPayload>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    #[serde(default)]
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReviewPayload {
    #[serde(default)]
    state: Option<String>,
}
