use crate::domain::email::EmailMessage;
use async_trait::async_trait;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Provider rejected message with status {status}")]
    Rejected { status: u16, details: Value },
    #[error("Provider did not answer in time")]
    Timeout,
    #[error("Provider unreachable: {0}")]
    Unavailable(String),
}

impl DispatchError {
    /// Diagnostic detail safe to relay to the caller. Only the provider's own error body
    /// is passed through; transport failures get a generic description.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Rejected { details, .. } => details.clone(),
            Self::Timeout => json!({ "message": "Email provider timed out" }),
            Self::Unavailable(_) => json!({ "message": "Email provider unreachable" }),
        }
    }

    /// The provider's `message` field, when it sent one.
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { details, .. } => details.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}

#[async_trait]
pub trait EmailProvider: Send + Sync + std::fmt::Debug {
    /// Submits one message to the provider. A single attempt, no retry.
    ///
    /// # Errors
    /// Returns `DispatchError::Rejected` on a non-2xx answer, `Timeout` or `Unavailable`
    /// when the provider could not be reached.
    async fn send(&self, message: &EmailMessage) -> Result<Option<String>, DispatchError>;
}
