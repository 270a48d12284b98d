use crate::config::MailConfig;
use crate::domain::email::EmailMessage;
use crate::services::email::{DispatchError, EmailProvider};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

/// Client for the provider's message-creation endpoint.
#[derive(Clone, Debug)]
pub struct ResendProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl ResendProvider {
    /// Builds a provider client whose every call is bounded by the configured timeout.
    ///
    /// # Errors
    /// Returns `reqwest::Error` if the HTTP client cannot be constructed.
    pub fn new(config: &MailConfig, api_key: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(config.request_timeout_secs)).build()?;

        Ok(Self { client, url: config.provider_url.clone(), api_key: api_key.to_string() })
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send(&self, message: &EmailMessage) -> Result<Option<String>, DispatchError> {
        let response =
            self.client.post(&self.url).bearer_auth(&self.api_key).json(message).send().await.map_err(|e| {
                if e.is_timeout() { DispatchError::Timeout } else { DispatchError::Unavailable(e.to_string()) }
            })?;

        let status = response.status();
        // Error bodies that are not JSON are relayed as an empty object.
        let body = response.json::<Value>().await.unwrap_or_else(|_| json!({}));

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), details = %body, "Provider rejected message");
            return Err(DispatchError::Rejected { status: status.as_u16(), details: body });
        }

        Ok(body.get("id").and_then(Value::as_str).map(ToString::to_string))
    }
}
