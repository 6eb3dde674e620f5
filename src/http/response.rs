//! JSON response bodies and status mapping for contact outcomes.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::contact::handler::{
    Outcome, MSG_BAD_REQUEST, MSG_PERSISTENCE_FAILED, MSG_RATE_LIMITED,
};
use crate::contact::StoredContact;

/// Body of a successful submission.
#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<StoredContact>,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of the health check.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: String,
}

pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

pub const MSG_PAYLOAD_TOO_LARGE: &str = "Request body too large";
pub const MSG_REQUEST_TIMEOUT: &str = "Request timed out";

/// Rewrite plain-text rejections from the body-limit and timeout layers into
/// the JSON error envelope.
pub async fn json_rejections(response: Response) -> Response {
    let message = match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => MSG_PAYLOAD_TOO_LARGE,
        StatusCode::REQUEST_TIMEOUT => MSG_REQUEST_TIMEOUT,
        _ => return response,
    };
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }
    error(response.status(), message)
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Accepted { .. } => StatusCode::OK,
            Outcome::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Outcome::BadRequest | Outcome::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Outcome::PersistenceFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Outcome::Accepted { message, data } => (
                status,
                Json(SuccessBody {
                    success: true,
                    message,
                    data,
                }),
            )
                .into_response(),
            Outcome::RateLimited => error(status, MSG_RATE_LIMITED),
            Outcome::BadRequest => error(status, MSG_BAD_REQUEST),
            Outcome::ValidationFailed(errors) => error(status, errors),
            Outcome::PersistenceFailed => error(status, MSG_PERSISTENCE_FAILED),
        }
    }
}
