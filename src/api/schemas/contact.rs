use serde::Serialize;

/// Success body of the relay endpoint. `id` is present only when the provider
/// returned one, so a honeypot answer is indistinguishable from an id-less send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RelayResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self { ok: true, id: None }
    }

    #[must_use]
    pub const fn sent(id: Option<String>) -> Self {
        Self { ok: true, id }
    }
}

/// Body of every site-route response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteResponse {
    pub message: String,
}

impl SiteResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
