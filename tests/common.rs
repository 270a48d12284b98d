#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub, missing_debug_implementations)]
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::future::IntoFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wallpaper_contact::api::{MgmtState, app_router, mgmt_router};
use wallpaper_contact::config::{
    Config, DatabaseConfig, HealthConfig, HoneypotConfig, MailConfig, ServerConfig, TelemetryConfig,
};
use wallpaper_contact::domain::honeypot::HoneypotLogEntry;
use wallpaper_contact::services::bot_log::{HoneypotLogStore, StoreError};

pub const RECIPIENT: &str = "private-inbox@example.com";
pub const API_KEY: &str = "re_test_key";

/// In-memory honeypot store that can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    pub entries: Mutex<Vec<HoneypotLogEntry>>,
    pub attempts: Mutex<usize>,
    pub fail: AtomicBool,
}

impl MemoryLogStore {
    pub fn entries(&self) -> Vec<HoneypotLogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl HoneypotLogStore for MemoryLogStore {
    async fn append(&self, entry: &HoneypotLogEntry) -> Result<(), StoreError> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".into()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".into()));
        }
        Ok(())
    }
}

/// How the fake email provider answers.
#[derive(Clone, Debug)]
pub enum ProviderBehavior {
    Accept { id: Option<String> },
    Reject { status: u16, body: String },
    Hang,
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct ProviderState {
    behavior: ProviderBehavior,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn provider_handler(State(state): State<ProviderState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorization = headers.get("authorization").and_then(|v| v.to_str().ok()).map(ToString::to_string);
    state.captured.lock().unwrap().push(CapturedRequest { authorization, body });

    match state.behavior {
        ProviderBehavior::Accept { id: Some(id) } => Json(json!({ "id": id })).into_response(),
        ProviderBehavior::Accept { id: None } => Json(json!({})).into_response(),
        ProviderBehavior::Reject { status, body } => {
            (StatusCode::from_u16(status).unwrap(), [("content-type", "application/json")], body).into_response()
        }
        ProviderBehavior::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({ "id": "too-late" })).into_response()
        }
    }
}

/// Stand-in for the transactional email API, listening on an ephemeral port.
pub struct FakeProvider {
    pub url: String,
    pub captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeProvider {
    pub async fn spawn(behavior: ProviderBehavior) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/emails", post(provider_handler))
            .with_state(ProviderState { behavior, captured: Arc::clone(&captured) });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(axum::serve(listener, router).into_future());

        Self { url: format!("http://{addr}/emails"), captured }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

pub fn get_test_config(provider_url: &str) -> Config {
    Config {
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 0, mgmt_port: 0, ..ServerConfig::default() },
        mail: MailConfig {
            resend_api_key: Some(API_KEY.to_string()),
            provider_url: provider_url.to_string(),
            recipient: RECIPIENT.to_string(),
            request_timeout_secs: 1,
            ..MailConfig::default()
        },
        honeypot: HoneypotConfig::default(),
        database: DatabaseConfig::default(),
        telemetry: TelemetryConfig::default(),
        health: HealthConfig { db_timeout_ms: 500 },
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryLogStore>,
    pub provider: FakeProvider,
    pub config: Config,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(ProviderBehavior::Accept { id: Some("abc123".to_string()) }, |_| {}).await
    }

    pub async fn spawn_with(behavior: ProviderBehavior, customize: impl FnOnce(&mut Config)) -> Self {
        wallpaper_contact::telemetry::init_test_telemetry();

        let provider = FakeProvider::spawn(behavior).await;
        let mut config = get_test_config(&provider.url);
        customize(&mut config);

        let store = Arc::new(MemoryLogStore::default());
        let app = wallpaper_contact::AppBuilder::new(config.clone())
            .with_log_store(Arc::clone(&store) as Arc<dyn HoneypotLogStore>)
            .build()
            .unwrap();

        let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let router = app_router(app.contact_service, config.server.max_body_bytes);
        let mgmt = mgmt_router(MgmtState { health_service: app.health_service });
        tokio::spawn(axum::serve(api_listener, router).into_future());
        tokio::spawn(axum::serve(mgmt_listener, mgmt).into_future());

        Self { server_url, mgmt_url, client: reqwest::Client::new(), store, provider, config }
    }

    pub fn relay_url(&self) -> String {
        format!("{}/functions/v1/contact", self.server_url)
    }

    pub fn site_url(&self) -> String {
        format!("{}/api/contact", self.server_url)
    }

    pub async fn post_relay(&self, body: &Value) -> reqwest::Response {
        self.client.post(self.relay_url()).json(body).send().await.unwrap()
    }
}

pub fn valid_submission() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "subject": "Neon collection",
        "message": "Could you upload the neon set in 4K?",
        "company": ""
    })
}

pub fn assert_cors(resp: &reqwest::Response) {
    let headers = resp.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "authorization, x-client-info, apikey, content-type"
    );
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST, OPTIONS");
}
