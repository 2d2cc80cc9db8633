//! Chat message text for a pull request under review.

use url::Url;

use crate::domain::{AppError, PullRequestEvent};

/// Maximum number of title characters shown before truncation.
pub const MAX_TITLE_CHARS: usize = 60;

const ELLIPSIS: char = '…';

/// Everything needed to render the review-progress line for one PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMessage {
    pub pr_number: u64,
    pub pr_author: String,
    pub pr_title: String,
    pub pr_link: String,
}

impl ReviewMessage {
    pub fn for_event(event: &PullRequestEvent, web_url: &Url) -> Result<Self, AppError> {
        Ok(Self {
            pr_number: event.pr_number,
            pr_author: event.pr_author.clone(),
            pr_title: event.pr_title.clone(),
            pr_link: pr_link(web_url, &event.repo_id, event.pr_number)?,
        })
    }

    /// Render the message at `approvals` of `quorum`.
    pub fn render(&self, approvals: u32, quorum: u32) -> String {
        format!(
            "({} of {} approvals) PR #{} by {}:\n<{}|{}>\n---",
            approvals,
            quorum,
            self.pr_number,
            self.pr_author,
            self.pr_link,
            truncate_title(&self.pr_title)
        )
    }
}

/// Build the web link to a pull request, e.g. `https://github.com/org/repo/pull/42`.
pub fn pr_link(web_url: &Url, repo_id: &str, pr_number: u64) -> Result<String, AppError> {
    let link = web_url.join(&format!("{}/pull/{}", repo_id, pr_number)).map_err(|e| {
        AppError::config_error(format!("Cannot build PR link from '{}': {}", web_url, e))
    })?;
    Ok(link.to_string())
}

/// Cut titles longer than [`MAX_TITLE_CHARS`] characters and append an ellipsis.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(MAX_TITLE_CHARS).collect();
    truncated.push(ELLIPSIS);
    truncated
}
