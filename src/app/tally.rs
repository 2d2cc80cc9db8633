//! Approval counting.

use crate::domain::AppError;
use crate::ports::{APPROVED_REVIEW_STATE, ReviewHost};

/// Count approving reviews on a pull request. Always a fresh read.
pub fn count_approvals(
    host: &impl ReviewHost,
    repo_id: &str,
    pr_number: u64,
) -> Result<u32, AppError> {
    let reviews = host.list_reviews(repo_id, pr_number)?;
    let approved = reviews.iter().filter(|review| review.state == APPROVED_REVIEW_STATE).count();
    Ok(u32::try_from(approved).unwrap_or(u32::MAX))
}
