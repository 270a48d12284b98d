use crate::domain::honeypot::HoneypotLogEntry;
use crate::domain::submission::{Classification, Submission};
use crate::error::{AppError, Result};
use crate::services::bot_log::BotActivityLogger;
use crate::services::email::{DispatchError, EmailDispatcher};
use axum::http::HeaderMap;
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) submissions_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("wallpaper-contact");
        Self {
            submissions_total: meter
                .u64_counter("contact_submissions_total")
                .with_description("Contact submissions by route and outcome")
                .build(),
        }
    }

    fn record(&self, route: &'static str, outcome: &'static str) {
        self.submissions_total.add(1, &[KeyValue::new("route", route), KeyValue::new("outcome", outcome)]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Honeypot hit. Answered exactly like a success that carries no id.
    Neutral,
    /// Delivered to the provider, with its message id when it returned one.
    Sent(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOutcome {
    Sent,
    /// No provider credential configured; the submission was only logged.
    LoggedOnly,
}

/// Wires validation, the honeypot gate, bot logging and email dispatch together.
#[derive(Clone, Debug)]
pub struct ContactService {
    dispatcher: Option<EmailDispatcher>,
    bot_logger: BotActivityLogger,
    ip_headers: Arc<[String]>,
    metrics: Metrics,
}

impl ContactService {
    #[must_use]
    pub fn new(dispatcher: Option<EmailDispatcher>, bot_logger: BotActivityLogger, ip_headers: Vec<String>) -> Self {
        Self { dispatcher, bot_logger, ip_headers: ip_headers.into(), metrics: Metrics::new() }
    }

    /// Runs one relay submission from raw body bytes to its outcome.
    ///
    /// # Errors
    /// Returns `AppError::Config` when no provider credential is configured,
    /// `AppError::InvalidRequest` for a body that is not JSON, `AppError::Validation`
    /// for a human submission that breaks a content rule and `AppError::Dispatch`
    /// when the provider fails.
    #[tracing::instrument(skip_all)]
    pub async fn relay(&self, headers: &HeaderMap, body: &[u8]) -> Result<RelayOutcome> {
        let dispatcher = self.dispatcher.as_ref().ok_or(AppError::Config("RESEND_API_KEY"))?;

        let payload: Value = serde_json::from_slice(body).map_err(|e| {
            self.metrics.record("relay", "invalid_request");
            tracing::debug!(error = %e, "Relay body is not JSON");
            AppError::InvalidRequest
        })?;

        let submission = Submission::from_json(&payload);

        if submission.classify() == Classification::Bot {
            self.metrics.record("relay", "honeypot");
            let entry = HoneypotLogEntry::from_request(headers, &self.ip_headers, payload);
            // Awaited so the write is attempted before the response leaves.
            self.bot_logger.record(entry).await;
            return Ok(RelayOutcome::Neutral);
        }

        if let Err(e) = submission.validate() {
            self.metrics.record("relay", "invalid");
            return Err(e.into());
        }

        match dispatcher.dispatch(&submission).await {
            Ok(id) => {
                self.metrics.record("relay", "sent");
                Ok(RelayOutcome::Sent(id))
            }
            Err(e) => {
                self.metrics.record("relay", "dispatch_failed");
                Err(e.into())
            }
        }
    }

    /// Delivers a site-route submission that already passed the presence check.
    /// Without a provider credential the submission is noted in the operator log and
    /// still counts as accepted.
    ///
    /// # Errors
    /// Returns the provider's `DispatchError` when sending fails.
    #[tracing::instrument(skip_all)]
    pub async fn submit_site(&self, submission: &Submission) -> std::result::Result<SiteOutcome, DispatchError> {
        let Some(dispatcher) = &self.dispatcher else {
            self.metrics.record("site", "logged_only");
            tracing::warn!(
                reply_to = %submission.email,
                subject_present = !submission.subject.is_empty(),
                "Email provider not configured; contact submission logged only"
            );
            return Ok(SiteOutcome::LoggedOnly);
        };

        match dispatcher.dispatch(submission).await {
            Ok(_) => {
                self.metrics.record("site", "sent");
                Ok(SiteOutcome::Sent)
            }
            Err(e) => {
                self.metrics.record("site", "dispatch_failed");
                Err(e)
            }
        }
    }
}
