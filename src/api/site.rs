use crate::api::AppState;
use crate::api::schemas::contact::SiteResponse;
use crate::domain::submission::Submission;
use crate::services::contact_service::SiteOutcome;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};
use serde_json::Value;

const PROVIDER_FALLBACK: &str = "Failed to send email. Check your Resend API key.";

/// Site-hosted contact route. Applies only the presence check and answers with
/// `{message}` bodies.
pub async fn contact(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<SiteResponse>) {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Contact form body could not be read");
            return internal_error();
        }
    };

    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Null) => {
            tracing::error!("Contact form body is null");
            return internal_error();
        }
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(error = %e, "Contact form error");
            return internal_error();
        }
    };

    if !Submission::has_required_fields(&payload) {
        return (StatusCode::BAD_REQUEST, Json(SiteResponse::new("Missing required fields")));
    }
    let submission = Submission::from_json(&payload);

    tracing::info!(
        from_name = %submission.name,
        from_email = %submission.email,
        subject = if submission.subject.is_empty() { "No Subject" } else { submission.subject.as_str() },
        "New contact form submission"
    );

    match state.contact_service.submit_site(&submission).await {
        Ok(SiteOutcome::Sent | SiteOutcome::LoggedOnly) => {
            (StatusCode::OK, Json(SiteResponse::new("Message sent successfully!")))
        }
        Err(e) => {
            let detail = e.provider_message().unwrap_or(PROVIDER_FALLBACK);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(SiteResponse::new(format!("Email service error: {detail}"))))
        }
    }
}

fn internal_error() -> (StatusCode, Json<SiteResponse>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(SiteResponse::new("Internal server error. Please try again later.")))
}
