//! Slack Web API client implementing the chat host port.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::{AppError, HttpSettings, MessageHandle, SlackSettings};
use crate::ports::ChatHost;

const HOST: &str = "Slack";
const UNKNOWN_ERROR_CODE: &str = "unknown_error";

/// HTTP transport for Slack `chat.*` methods.
#[derive(Clone)]
pub struct SlackHttpClient {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for SlackHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackHttpClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl SlackHttpClient {
    pub fn new(token: String, slack: &SlackSettings, http: &HttpSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .map_err(|e| AppError::Transport {
                host: HOST,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { token, api_url: slack.api_url.clone(), client })
    }

    /// Call a Web API method and decode its envelope.
    ///
    /// Slack signals failure with `ok: false` even on HTTP 200.
    fn call<B: Serialize>(&self, method: &str, body: &B) -> Result<ApiResponse, AppError> {
        let url = self.api_url.join(method).map_err(|e| AppError::Transport {
            host: HOST,
            message: format!("Invalid method '{}': {}", method, e),
        })?;
        debug!(method, "Slack call");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|e| AppError::Transport {
                host: HOST,
                message: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::ChatApi { code: format!("http_{}", status.as_u16()) });
        }

        let api_response: ApiResponse =
            serde_json::from_str(&body_text).map_err(|e| AppError::UnexpectedResponse {
                host: HOST,
                details: format!("Failed to parse response: {}", e),
            })?;

        if !api_response.ok {
            let code = api_response.error.unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string());
            return Err(AppError::ChatApi { code });
        }

        Ok(api_response)
    }
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateMessageRequest<'a> {
    channel: &'a str,
    ts: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct DeleteMessageRequest<'a> {
    channel: &'a str,
    ts: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

impl ChatHost for SlackHttpClient {
    fn post_message(&self, channel: &str, text: &str) -> Result<MessageHandle, AppError> {
        let response = self.call("chat.postMessage", &PostMessageRequest { channel, text })?;
        response.ts.and_then(MessageHandle::new).ok_or_else(|| AppError::UnexpectedResponse {
            host: HOST,
            details: "No message ts in chat.postMessage response".to_string(),
        })
    }

    fn update_message(
        &self,
        channel: &str,
        handle: &MessageHandle,
        text: &str,
    ) -> Result<(), AppError> {
        self.call("chat.update", &UpdateMessageRequest { channel, ts: handle.as_str(), text })?;
        Ok(())
    }

    fn delete_message(&self, channel: &str, handle: &MessageHandle) -> Result<(), AppError> {
        self.call("chat.delete", &DeleteMessageRequest { channel, ts: handle.as_str() })?;
        Ok(())
    }
}
