//! Review host (GitHub) port definition.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::AppError;

/// Review state GitHub reports for approving reviews.
pub const APPROVED_REVIEW_STATE: &str = "APPROVED";

/// A review attached to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Review {
    pub id: u64,
    /// Host enumeration: `APPROVED`, `CHANGES_REQUESTED`, `COMMENTED`, ...
    pub state: String,
}

/// A conversation comment on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrComment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Port for review host operations.
pub trait ReviewHost {
    /// List every review on the pull request.
    fn list_reviews(&self, repo_id: &str, pr_number: u64) -> Result<Vec<Review>, AppError>;

    /// List every conversation comment on the pull request, oldest first.
    fn list_pr_comments(&self, repo_id: &str, pr_number: u64) -> Result<Vec<PrComment>, AppError>;

    /// Append a comment and return its ID.
    fn create_pr_comment(&self, repo_id: &str, pr_number: u64, body: &str)
    -> Result<u64, AppError>;
}

impl<T: ReviewHost + ?Sized> ReviewHost for &T {
    fn list_reviews(&self, repo_id: &str, pr_number: u64) -> Result<Vec<Review>, AppError> {
        (**self).list_reviews(repo_id, pr_number)
    }

    fn list_pr_comments(&self, repo_id: &str, pr_number: u64) -> Result<Vec<PrComment>, AppError> {
        (**self).list_pr_comments(repo_id, pr_number)
    }

    fn create_pr_comment(
        &self,
        repo_id: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<u64, AppError> {
        (**self).create_pr_comment(repo_id, pr_number, body)
    }
}
