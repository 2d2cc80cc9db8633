//! Correlation between a pull request and its chat message.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comment prefix marking a stored message handle.
pub const CORRELATION_TAG: &str = "SLACK_MESSAGE_TS:";

/// Comment prefix marking a handle whose message has been removed.
pub const RETIREMENT_TAG: &str = "SLACK_MESSAGE_RETIRED:";

/// Opaque identifier of a posted chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageHandle(String);

impl MessageHandle {
    /// Wrap a raw handle, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the correlation store knows about one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    /// No message was ever recorded.
    Absent,
    /// A message is posted and not yet resolved.
    Live(MessageHandle),
    /// Every recorded message has been resolved.
    Retired,
}

impl Correlation {
    /// The live handle, if any.
    pub fn into_live(self) -> Option<MessageHandle> {
        match self {
            Correlation::Live(handle) => Some(handle),
            Correlation::Absent | Correlation::Retired => None,
        }
    }
}

/// Identifies the pull request a correlation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey {
    pub repo_id: String,
    pub pr_number: u64,
}

impl CorrelationKey {
    pub fn new(repo_id: impl Into<String>, pr_number: u64) -> Self {
        Self { repo_id: repo_id.into(), pr_number }
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo_id, self.pr_number)
    }
}

/// Comment body recording `handle`.
pub fn correlation_comment(handle: &MessageHandle) -> String {
    format!("{}{}", CORRELATION_TAG, handle)
}

/// Comment body retiring `handle`.
pub fn retirement_comment(handle: &MessageHandle) -> String {
    format!("{}{}", RETIREMENT_TAG, handle)
}

/// Extract the handle from a correlation comment body.
pub fn parse_correlation_comment(body: &str) -> Option<MessageHandle> {
    body.strip_prefix(CORRELATION_TAG).and_then(MessageHandle::new)
}

/// Extract the handle from a retirement comment body.
pub fn parse_retirement_comment(body: &str) -> Option<MessageHandle> {
    body.strip_prefix(RETIREMENT_TAG).and_then(MessageHandle::new)
}
