pub mod provider;

pub use provider::{DispatchError, EmailProvider};

use crate::config::MailConfig;
use crate::domain::email::EmailMessage;
use crate::domain::submission::Submission;
use opentelemetry::{KeyValue, global, metrics::Histogram};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) dispatch_duration_seconds: Histogram<f64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("wallpaper-contact");
        Self {
            dispatch_duration_seconds: meter
                .f64_histogram("contact_email_dispatch_duration_seconds")
                .with_description("Latency of calls to the email provider")
                .build(),
        }
    }
}

/// Renders submissions and hands them to the configured provider.
#[derive(Clone, Debug)]
pub struct EmailDispatcher {
    provider: Arc<dyn EmailProvider>,
    from: String,
    recipient: String,
    metrics: Metrics,
}

impl EmailDispatcher {
    #[must_use]
    pub fn new(provider: Arc<dyn EmailProvider>, config: &MailConfig) -> Self {
        Self {
            provider,
            from: config.from_address.clone(),
            recipient: config.recipient.clone(),
            metrics: Metrics::new(),
        }
    }

    /// Sends a validated submission to the private recipient.
    ///
    /// # Errors
    /// Returns the provider's `DispatchError` unchanged.
    #[tracing::instrument(level = "debug", skip_all, err(Display))]
    pub async fn dispatch(&self, submission: &Submission) -> Result<Option<String>, DispatchError> {
        let message = EmailMessage::for_submission(submission, &self.from, &self.recipient);

        let started = Instant::now();
        let result = self.provider.send(&message).await;
        let outcome = if result.is_ok() { "ok" } else { "error" };
        self.metrics
            .dispatch_duration_seconds
            .record(started.elapsed().as_secs_f64(), &[KeyValue::new("outcome", outcome)]);

        if let Ok(id) = &result {
            tracing::info!(provider_id = id.as_deref().unwrap_or_default(), "Contact email dispatched");
        }
        result
    }
}
