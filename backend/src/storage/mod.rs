// src/storage/mod.rs

//! Key-value storage facility.
//!
//! Everything the service persists lives under a handful of string keys:
//! the exam collection as one JSON blob and the session token as a plain
//! string. Backends only need `get`, `set` and `remove`.

use async_trait::async_trait;

use crate::error::AppError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Async key-value store.
///
/// Read failures are reported as `AppError::StorageReadFailure`, write and
/// remove failures as `AppError::StorageWriteFailure`. Callers decide whether
/// to degrade or propagate.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is no entry.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removes the entry under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}
