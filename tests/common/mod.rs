//! Shared utilities for integration tests.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use contact_service::config::{PersistenceConfig, ServiceConfig};
use contact_service::persistence::PersistenceGateway;
use contact_service::{HttpServer, Shutdown};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-service-key";

/// How the mock row store answers inserts.
#[derive(Clone, Copy)]
#[allow(dead_code)]
pub enum Behavior {
    Healthy,
    Failing(StatusCode, &'static str),
    Slow(Duration),
}

/// In-memory stand-in for a PostgREST table.
#[derive(Clone)]
pub struct MockRowStore {
    behavior: Behavior,
    rows: Arc<Mutex<Vec<Value>>>,
    headers: Arc<Mutex<Vec<HeaderMap>>>,
}

#[allow(dead_code)]
impl MockRowStore {
    pub fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert_headers(&self) -> Vec<HeaderMap> {
        self.headers.lock().unwrap().clone()
    }
}

/// Start a mock row store on an ephemeral port.
pub async fn start_row_store(behavior: Behavior) -> (SocketAddr, MockRowStore) {
    let store = MockRowStore {
        behavior,
        rows: Arc::default(),
        headers: Arc::default(),
    };
    let app = Router::new()
        .route("/rest/v1/{table}", post(insert_rows).get(select_rows))
        .with_state(store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, store)
}

async fn insert_rows(
    State(store): State<MockRowStore>,
    headers: HeaderMap,
    Json(rows): Json<Vec<Value>>,
) -> Response {
    store.headers.lock().unwrap().push(headers);

    match store.behavior {
        Behavior::Failing(status, detail) => {
            return (status, Json(json!({ "message": detail }))).into_response();
        }
        Behavior::Slow(delay) => tokio::time::sleep(delay).await,
        Behavior::Healthy => {}
    }

    let stored: Vec<Value> = rows
        .into_iter()
        .map(|mut row| {
            row["id"] = json!(uuid::Uuid::new_v4().to_string());
            row["created_at"] = json!(chrono::Utc::now().to_rfc3339());
            row["read"] = json!(false);
            row
        })
        .collect();
    store.rows.lock().unwrap().extend(stored.iter().cloned());

    (StatusCode::CREATED, Json(stored)).into_response()
}

async fn select_rows(
    State(store): State<MockRowStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    let id = query
        .get("id")
        .and_then(|filter| filter.strip_prefix("eq."))
        .unwrap_or_default()
        .to_string();
    let rows = store
        .rows()
        .into_iter()
        .filter(|row| row["id"] == json!(id))
        .collect();
    Json(rows)
}

/// Persistence settings pointing at `addr`.
#[allow(dead_code)]
pub fn persistence_config(addr: SocketAddr) -> PersistenceConfig {
    PersistenceConfig {
        url: Some(format!("http://{addr}")),
        api_key: Some(API_KEY.to_string()),
        ..PersistenceConfig::default()
    }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the contact service on an ephemeral port, returning its base URL.
pub async fn start_service<G: PersistenceGateway>(
    config: ServiceConfig,
    gateway: G,
) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, gateway);
    let signalled = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, signalled).await;
    });

    (format!("http://{addr}"), shutdown)
}
