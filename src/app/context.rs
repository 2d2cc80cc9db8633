use url::Url;

use crate::domain::NotifierConfig;
use crate::ports::{ChatHost, CorrelationStore, ReviewHost};

/// Settings the lifecycle coordinator needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    /// Approvals required before the message is removed.
    pub quorum: u32,
    /// Channel name used when posting.
    pub post_channel: String,
    /// Channel ID used for update and delete.
    pub edit_channel: String,
    /// Web base URL for PR links.
    pub web_url: Url,
}

impl CoordinatorSettings {
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self {
            quorum: config.settings.review.quorum,
            post_channel: config.credentials.slack_channel.clone(),
            edit_channel: config.credentials.slack_channel_id.clone(),
            web_url: config.settings.github.web_url.clone(),
        }
    }
}

/// Application context holding dependencies for event handling.
pub struct NotifierContext<R: ReviewHost, C: ChatHost, S: CorrelationStore> {
    review_host: R,
    chat: C,
    store: S,
    settings: CoordinatorSettings,
}

impl<R: ReviewHost, C: ChatHost, S: CorrelationStore> NotifierContext<R, C, S> {
    /// Create a new notifier context.
    pub fn new(review_host: R, chat: C, store: S, settings: CoordinatorSettings) -> Self {
        Self { review_host, chat, store, settings }
    }

    /// Get a reference to the review host.
    pub fn review_host(&self) -> &R {
        &self.review_host
    }

    /// Get a reference to the chat host.
    pub fn chat(&self) -> &C {
        &self.chat
    }

    /// Get a reference to the correlation store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }
}
