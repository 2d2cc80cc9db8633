//! Correlation store port: PR → chat message handle.

use crate::domain::{AppError, Correlation, CorrelationKey, MessageHandle};

/// Key-value store for the message handle of each open pull request.
pub trait CorrelationStore {
    /// Record `handle` as the live message for `key`.
    fn put(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError>;

    /// Report whether `key` has a live handle, only retired ones, or nothing.
    fn lookup(&self, key: &CorrelationKey) -> Result<Correlation, AppError>;

    /// Mark `handle` as resolved so later lookups no longer return it.
    fn retire(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError>;

    /// Return the live handle for `key`, if any.
    fn get(&self, key: &CorrelationKey) -> Result<Option<MessageHandle>, AppError> {
        Ok(self.lookup(key)?.into_live())
    }
}

impl<T: CorrelationStore + ?Sized> CorrelationStore for Box<T> {
    fn put(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError> {
        (**self).put(key, handle)
    }

    fn lookup(&self, key: &CorrelationKey) -> Result<Correlation, AppError> {
        (**self).lookup(key)
    }

    fn retire(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError> {
        (**self).retire(key, handle)
    }
}
