//! Correlation store backed by tagged pull-request comments.
//!
//! The comment thread is used as an append-only log: `put` appends a
//! `SLACK_MESSAGE_TS:<handle>` comment and `retire` appends a
//! `SLACK_MESSAGE_RETIRED:<handle>` comment. Nothing is ever edited or removed.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::correlation::{
    correlation_comment, parse_correlation_comment, parse_retirement_comment, retirement_comment,
};
use crate::domain::{AppError, Correlation, CorrelationKey, MessageHandle};
use crate::ports::{CorrelationStore, ReviewHost};

#[derive(Debug, Clone)]
pub struct CommentCorrelationStore<R: ReviewHost> {
    host: R,
}

impl<R: ReviewHost> CommentCorrelationStore<R> {
    pub fn new(host: R) -> Self {
        Self { host }
    }
}

impl<R: ReviewHost> CorrelationStore for CommentCorrelationStore<R> {
    fn put(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError> {
        self.host.create_pr_comment(&key.repo_id, key.pr_number, &correlation_comment(handle))?;
        Ok(())
    }

    fn lookup(&self, key: &CorrelationKey) -> Result<Correlation, AppError> {
        let comments = self.host.list_pr_comments(&key.repo_id, key.pr_number)?;

        let retired: HashSet<MessageHandle> =
            comments.iter().filter_map(|c| parse_retirement_comment(&c.body)).collect();

        let tagged: Vec<_> = comments
            .iter()
            .enumerate()
            .filter_map(|(position, comment)| {
                parse_correlation_comment(&comment.body)
                    .map(|handle| (comment.created_at, position, handle))
            })
            .collect();
        if tagged.is_empty() {
            return Ok(Correlation::Absent);
        }

        let live: Vec<_> =
            tagged.into_iter().filter(|(_, _, handle)| !retired.contains(handle)).collect();

        if live.len() > 1 {
            warn!(
                correlation = %key,
                count = live.len(),
                "Multiple live correlation comments; using the most recent"
            );
        }

        Ok(live
            .into_iter()
            .max_by_key(|(created_at, position, _)| (*created_at, *position))
            .map_or(Correlation::Retired, |(_, _, handle)| Correlation::Live(handle)))
    }

    fn retire(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError> {
        self.host.create_pr_comment(&key.repo_id, key.pr_number, &retirement_comment(handle))?;
        Ok(())
    }
}
