use crate::api::AppState;
use crate::api::schemas::contact::RelayResponse;
use crate::error::{AppError, Result};
use crate::services::contact_service::RelayOutcome;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method},
};

/// Relay endpoint called directly by the browser form.
///
/// `OPTIONS` answers the CORS preflight whatever its body, `POST` runs the
/// submission pipeline and anything else is refused.
///
/// # Errors
/// Returns `AppError` mapped to the relay's JSON error contract.
pub async fn contact(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<RelayResponse>> {
    if method == Method::OPTIONS {
        return Ok(Json(RelayResponse::ok()));
    }
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body = body?;
    let response = match state.contact_service.relay(&headers, &body).await? {
        RelayOutcome::Neutral => RelayResponse::ok(),
        RelayOutcome::Sent(id) => RelayResponse::sent(id),
    };

    Ok(Json(response))
}
