#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::database::DbPool;
use crate::adapters::database::honeypot_log_repo::HoneypotLogRepository;
use crate::adapters::email::ResendProvider;
use crate::config::Config;
use crate::services::bot_log::{BotActivityLogger, HoneypotLogStore};
use crate::services::contact_service::ContactService;
use crate::services::email::{EmailDispatcher, EmailProvider};
use crate::services::health_service::HealthService;
use std::sync::Arc;
use tokio::sync::watch;

/// Fully wired services, ready to be mounted on routers.
#[derive(Debug)]
pub struct App {
    pub contact_service: ContactService,
    pub health_service: HealthService,
}

/// Assembles the service graph from explicit dependencies. The relay never builds
/// its own store or provider handles, so either can be swapped for a fake.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    log_store: Option<Arc<dyn HoneypotLogStore>>,
    email_provider: Option<Arc<dyn EmailProvider>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, log_store: None, email_provider: None }
    }

    #[must_use]
    pub fn with_database(mut self, pool: DbPool) -> Self {
        self.log_store = Some(Arc::new(HoneypotLogRepository::new(pool)));
        self
    }

    #[must_use]
    pub fn with_log_store(mut self, store: Arc<dyn HoneypotLogStore>) -> Self {
        self.log_store = Some(store);
        self
    }

    /// Overrides the provider that would otherwise be built from `RESEND_API_KEY`.
    #[must_use]
    pub fn with_email_provider(mut self, provider: Arc<dyn EmailProvider>) -> Self {
        self.email_provider = Some(provider);
        self
    }

    /// Builds the services.
    ///
    /// # Errors
    /// Returns an error if no log store was supplied or the provider client cannot be built.
    pub fn build(self) -> anyhow::Result<App> {
        let store = self.log_store.ok_or_else(|| anyhow::anyhow!("a honeypot log store is required"))?;

        let provider = match (self.email_provider, self.config.mail.api_key()) {
            (Some(provider), _) => Some(provider),
            (None, Some(key)) => Some(Arc::new(ResendProvider::new(&self.config.mail, key)?) as Arc<dyn EmailProvider>),
            (None, None) => {
                tracing::warn!("RESEND_API_KEY not configured; relay will refuse and site route will only log");
                None
            }
        };

        let dispatcher = provider.map(|p| EmailDispatcher::new(p, &self.config.mail));
        let bot_logger = BotActivityLogger::new(store);

        Ok(App {
            health_service: HealthService::new(bot_logger.clone(), self.config.health.clone()),
            contact_service: ContactService::new(dispatcher, bot_logger, self.config.honeypot.client_ip_headers),
        })
    }
}

/// Routes panics through `tracing` so they reach the structured log.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(panic = %info, location = %location, "Thread panicked");
    }));
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
