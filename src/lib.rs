//! pr-notifier: mirror pull request review progress into a Slack channel.
//!
//! Each invocation handles one webhook event. State lives outside the process:
//! approvals are re-read from GitHub and the Slack message handle is kept in a
//! correlation store (tagged PR comments by default).

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    HandleAction, HandleOutput, PreviewOutput, handle_event, load_config, load_settings, preview,
    read_event,
};
pub use domain::{AppError, EventKind, NotifierConfig, PullRequestEvent};
