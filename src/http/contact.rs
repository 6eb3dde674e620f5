//! `/api/contact` routes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing, Json, Router};
use chrono::{SecondsFormat, Utc};

use crate::http::request::PeerAddr;
use crate::http::response::{error, HealthBody};
use crate::http::server::AppState;
use crate::persistence::PersistenceGateway;
use crate::security::resolve_origin;

pub const CONTACT_PATH: &str = "/api/contact";

pub fn router<G: PersistenceGateway>(state: AppState<G>) -> Router {
    Router::new()
        .route(CONTACT_PATH, routing::post(submit::<G>).get(health))
        .fallback(not_found)
        .with_state(state)
}

async fn submit<G: PersistenceGateway>(
    State(state): State<AppState<G>>,
    PeerAddr(peer): PeerAddr,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let origin = resolve_origin(&headers, peer, state.trust_forwarded_for);
    state.handler.handle(&body, &origin).await.into_response()
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}
