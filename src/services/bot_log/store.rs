use crate::domain::honeypot::HoneypotLogEntry;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only destination for honeypot hits.
#[async_trait]
pub trait HoneypotLogStore: Send + Sync + std::fmt::Debug {
    /// Persists one entry.
    ///
    /// # Errors
    /// Returns `StoreError` if the write did not complete.
    async fn append(&self, entry: &HoneypotLogEntry) -> Result<(), StoreError>;

    /// Cheap connectivity check used by the readiness probe.
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be reached.
    async fn ping(&self) -> Result<(), StoreError>;
}
