mod chat_host;
mod correlation_store;
mod review_host;

pub use chat_host::ChatHost;
pub use correlation_store::CorrelationStore;
pub use review_host::{APPROVED_REVIEW_STATE, PrComment, Review, ReviewHost};
