pub mod config;
pub mod correlation;
pub mod error;
pub mod event;
pub mod message;

pub use config::{
    Credentials, GitHubSettings, HttpSettings, NotifierConfig, NotifierSettings, ReviewSettings,
    SlackSettings, StoreBackend, StoreSettings,
};
pub use correlation::{Correlation, CorrelationKey, MessageHandle};
pub use error::AppError;
pub use event::{EventKind, PullRequestEvent};
pub use message::ReviewMessage;
