pub mod store;

pub use store::{HoneypotLogStore, StoreError};

use crate::domain::honeypot::HoneypotLogEntry;
use opentelemetry::{global, metrics::Counter};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) hits_total: Counter<u64>,
    pub(crate) write_failures_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("wallpaper-contact");
        Self {
            hits_total: meter
                .u64_counter("contact_honeypot_hits_total")
                .with_description("Submissions that filled the honeypot field")
                .build(),
            write_failures_total: meter
                .u64_counter("contact_honeypot_log_failures_total")
                .with_description("Honeypot hits that could not be persisted")
                .build(),
        }
    }
}

/// Best-effort recorder of suspected bot submissions.
#[derive(Clone, Debug)]
pub struct BotActivityLogger {
    store: Arc<dyn HoneypotLogStore>,
    metrics: Metrics,
}

impl BotActivityLogger {
    #[must_use]
    pub fn new(store: Arc<dyn HoneypotLogStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Attempts exactly one write. Failures are reported to the operator log and
    /// never returned, so the caller's response cannot depend on them.
    #[tracing::instrument(level = "debug", skip_all, fields(ip = %entry.ip_address))]
    pub async fn record(&self, entry: HoneypotLogEntry) {
        self.metrics.hits_total.add(1, &[]);
        tracing::warn!(ip = %entry.ip_address, user_agent = %entry.user_agent, "Honeypot hit");

        if let Err(e) = self.store.append(&entry).await {
            self.metrics.write_failures_total.add(1, &[]);
            tracing::error!(error = %e, "Failed to persist honeypot log entry");
        }
    }

    /// Pings the underlying store.
    ///
    /// # Errors
    /// Returns `StoreError` if the store is unreachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingStore {
        attempts: Mutex<Vec<HoneypotLogEntry>>,
        fail: bool,
    }

    #[async_trait]
    impl HoneypotLogStore for RecordingStore {
        async fn append(&self, entry: &HoneypotLogEntry) -> Result<(), StoreError> {
            self.attempts.lock().unwrap().push(entry.clone());
            if self.fail { Err(StoreError::Unavailable("disk on fire".into())) } else { Ok(()) }
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn entry() -> HoneypotLogEntry {
        HoneypotLogEntry {
            ip_address: "203.0.113.9".into(),
            user_agent: "spambot/1.0".into(),
            payload: json!({ "company": "ACME", "message": "buy now" }),
        }
    }

    #[tokio::test]
    async fn test_record_writes_entry_once() {
        let store = Arc::new(RecordingStore::default());
        let logger = BotActivityLogger::new(Arc::clone(&store) as Arc<dyn HoneypotLogStore>);

        logger.record(entry()).await;

        let attempts = store.attempts.lock().unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0], entry());
    }

    #[tokio::test]
    async fn test_record_swallows_store_failure() {
        let store = Arc::new(RecordingStore { fail: true, ..RecordingStore::default() });
        let logger = BotActivityLogger::new(Arc::clone(&store) as Arc<dyn HoneypotLogStore>);

        // Completes without surfacing the error
        logger.record(entry()).await;

        assert_eq!(store.attempts.lock().unwrap().len(), 1);
    }
}
