pub mod comment_correlation_store;
pub mod file_correlation_store;
pub mod github_http;
pub mod slack_http;

pub use comment_correlation_store::CommentCorrelationStore;
pub use file_correlation_store::FileCorrelationStore;
pub use github_http::GitHubHttpClient;
pub use slack_http::SlackHttpClient;
