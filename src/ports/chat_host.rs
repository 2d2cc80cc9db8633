//! Chat host (Slack) port definition.

use crate::domain::{AppError, MessageHandle};

/// Port for chat message operations.
///
/// Every call targets a single message in `channel`. Implementations report
/// host-side failures as [`AppError::ChatApi`] carrying the host's error code.
pub trait ChatHost {
    /// Post a new message and return its handle.
    fn post_message(&self, channel: &str, text: &str) -> Result<MessageHandle, AppError>;

    /// Replace the text of an existing message.
    fn update_message(
        &self,
        channel: &str,
        handle: &MessageHandle,
        text: &str,
    ) -> Result<(), AppError>;

    /// Remove a message.
    fn delete_message(&self, channel: &str, handle: &MessageHandle) -> Result<(), AppError>;
}

impl<T: ChatHost + ?Sized> ChatHost for &T {
    fn post_message(&self, channel: &str, text: &str) -> Result<MessageHandle, AppError> {
        (**self).post_message(channel, text)
    }

    fn update_message(
        &self,
        channel: &str,
        handle: &MessageHandle,
        text: &str,
    ) -> Result<(), AppError> {
        (**self).update_message(channel, handle, text)
    }

    fn delete_message(&self, channel: &str, handle: &MessageHandle) -> Result<(), AppError> {
        (**self).delete_message(channel, handle)
    }
}
