//! Opaque async key-value storage seam.
//!
//! The application only needs string values under string keys. Concrete
//! stores live in the infrastructure crate.

use async_trait::async_trait;

use crate::error::Result;

/// Async string-keyed store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
