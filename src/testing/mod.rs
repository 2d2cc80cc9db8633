mod fake_chat_host;
mod fake_review_host;

pub use fake_chat_host::{ChatCall, FakeChatHost};
pub use fake_review_host::FakeReviewHost;
