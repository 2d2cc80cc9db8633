use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::domain::AppError;
use crate::ports::{PrComment, Review, ReviewHost};

/// In-memory review host recording every call.
#[derive(Debug, Default)]
pub struct FakeReviewHost {
    pub reviews: Mutex<Vec<Review>>,
    pub comments: Mutex<Vec<PrComment>>,
    /// Call log, e.g. `list_reviews org/repo#42`.
    pub calls: Mutex<Vec<String>>,
    comments_failure: Mutex<Option<AppError>>,
    reviews_failure: Mutex<Option<AppError>>,
    create_failure: Mutex<Option<AppError>>,
}

impl FakeReviewHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with `approved` approving reviews and one comment review.
    pub fn with_approvals(approved: usize) -> Self {
        let host = Self::new();
        {
            let mut reviews = host.reviews.lock().unwrap();
            reviews.push(Review { id: 1, state: "COMMENTED".into() });
            for i in 0..approved {
                reviews.push(Review { id: 10 + i as u64, state: "APPROVED".into() });
            }
        }
        host
    }

    pub fn seed_comment(&self, body: &str) {
        let mut comments = self.comments.lock().unwrap();
        let id = 100 + comments.len() as u64;
        comments.push(PrComment { id, body: body.to_string(), created_at: None });
    }

    pub fn seed_comment_at(&self, body: &str, created_at: DateTime<Utc>) {
        let mut comments = self.comments.lock().unwrap();
        let id = 100 + comments.len() as u64;
        comments.push(PrComment { id, body: body.to_string(), created_at: Some(created_at) });
    }

    /// Make the next comment listing fail with `error`.
    pub fn fail_comments_with(&self, error: AppError) {
        *self.comments_failure.lock().unwrap() = Some(error);
    }

    /// Make the next review listing fail with `error`.
    pub fn fail_reviews_with(&self, error: AppError) {
        *self.reviews_failure.lock().unwrap() = Some(error);
    }

    /// Make the next comment creation fail with `error`.
    pub fn fail_create_comment_with(&self, error: AppError) {
        *self.create_failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_comments(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.split_once(" body=").map(|(_, body)| body.to_string()))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ReviewHost for FakeReviewHost {
    fn list_reviews(&self, repo_id: &str, pr_number: u64) -> Result<Vec<Review>, AppError> {
        self.record(format!("list_reviews {}#{}", repo_id, pr_number));
        if let Some(error) = self.reviews_failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.reviews.lock().unwrap().clone())
    }

    fn list_pr_comments(&self, repo_id: &str, pr_number: u64) -> Result<Vec<PrComment>, AppError> {
        self.record(format!("list_pr_comments {}#{}", repo_id, pr_number));
        if let Some(error) = self.comments_failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.comments.lock().unwrap().clone())
    }

    fn create_pr_comment(
        &self,
        repo_id: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<u64, AppError> {
        self.record(format!("create_pr_comment {}#{} body={}", repo_id, pr_number, body));
        if let Some(error) = self.create_failure.lock().unwrap().take() {
            return Err(error);
        }
        let mut comments = self.comments.lock().unwrap();
        let id = 100 + comments.len() as u64;
        comments.push(PrComment { id, body: body.to_string(), created_at: None });
        Ok(id)
    }
}
