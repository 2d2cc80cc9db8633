use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::{AppError, MessageHandle};
use crate::ports::ChatHost;

/// A recorded chat host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Post { channel: String, text: String },
    Update { channel: String, handle: String, text: String },
    Delete { channel: String, handle: String },
}

/// In-memory chat host that behaves like Slack for deleted messages.
#[derive(Debug, Default)]
pub struct FakeChatHost {
    pub calls: Mutex<Vec<ChatCall>>,
    live: Mutex<HashSet<String>>,
    post_failure: Mutex<Option<AppError>>,
    delete_failure: Mutex<Option<AppError>>,
}

impl FakeChatHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `handle` was posted by an earlier invocation.
    pub fn seed_message(&self, handle: &str) {
        self.live.lock().unwrap().insert(handle.to_string());
    }

    pub fn fail_post_with(&self, error: AppError) {
        *self.post_failure.lock().unwrap() = Some(error);
    }

    /// Make the next delete fail with `error`, leaving the message in place.
    pub fn fail_delete_with(&self, error: AppError) {
        *self.delete_failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&ChatCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn posts(&self) -> usize {
        self.count(|c| matches!(c, ChatCall::Post { .. }))
    }

    pub fn updates(&self) -> usize {
        self.count(|c| matches!(c, ChatCall::Update { .. }))
    }

    pub fn deletes(&self) -> usize {
        self.count(|c| matches!(c, ChatCall::Delete { .. }))
    }

    pub fn is_live(&self, handle: &str) -> bool {
        self.live.lock().unwrap().contains(handle)
    }
}

impl ChatHost for FakeChatHost {
    fn post_message(&self, channel: &str, text: &str) -> Result<MessageHandle, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push(ChatCall::Post { channel: channel.to_string(), text: text.to_string() });
        if let Some(error) = self.post_failure.lock().unwrap().take() {
            return Err(error);
        }
        let ts = format!("1712345678.{:06}", self.posts());
        self.live.lock().unwrap().insert(ts.clone());
        Ok(MessageHandle::new(ts).expect("generated ts is never blank"))
    }

    fn update_message(
        &self,
        channel: &str,
        handle: &MessageHandle,
        text: &str,
    ) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(ChatCall::Update {
            channel: channel.to_string(),
            handle: handle.to_string(),
            text: text.to_string(),
        });
        if !self.is_live(handle.as_str()) {
            return Err(AppError::ChatApi { code: "message_not_found".into() });
        }
        Ok(())
    }

    fn delete_message(&self, channel: &str, handle: &MessageHandle) -> Result<(), AppError> {
        self.calls
            .lock()
            .unwrap()
            .push(ChatCall::Delete { channel: channel.to_string(), handle: handle.to_string() });
        if let Some(error) = self.delete_failure.lock().unwrap().take() {
            return Err(error);
        }
        if !self.live.lock().unwrap().remove(handle.as_str()) {
            return Err(AppError::ChatApi { code: "message_not_found".into() });
        }
        Ok(())
    }
}
