use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use chambers_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use chambers_core_ratelimit_contracts::RateLimitService;
use chambers_models::{contact::ContactSubmission, SourceId};

use super::{error, internal_server_error};
use crate::models::{contact::ApiContactSubmission, ApiContactResponse};

pub fn router(
    ratelimit: Arc<impl RateLimitService>,
    contact: Arc<impl ContactFeatureService>,
) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .with_state((ratelimit, contact))
}

/// The rate limiter runs before the body is even parsed, so floods of
/// malformed requests are throttled as well (and consume quota).
async fn submit(
    State((ratelimit, contact)): State<(
        Arc<impl RateLimitService>,
        Arc<impl ContactFeatureService>,
    )>,
    Extension(source): Extension<SourceId>,
    body: Bytes,
) -> Response {
    if let Err(err) = ratelimit.admit(&source) {
        return error(StatusCode::TOO_MANY_REQUESTS, err.to_string());
    }

    let Ok(submission) = serde_json::from_slice::<ApiContactSubmission>(&body) else {
        return error(StatusCode::BAD_REQUEST, "Invalid request body.");
    };

    let submission = match ContactSubmission::validate(submission.into()) {
        Ok(submission) => submission,
        Err(err) => return error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
    };

    match contact.send_message(submission).await {
        Ok(()) => Json(ApiContactResponse::success()).into_response(),
        Err(err @ ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
