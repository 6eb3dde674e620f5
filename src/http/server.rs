//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, security headers)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServiceConfig;
use crate::contact::SubmissionHandler;
use crate::http::contact;
use crate::http::request::with_request_tracing;
use crate::http::response::json_rejections;
use crate::persistence::PersistenceGateway;
use crate::security::headers::with_security_headers;
use crate::security::RateLimiter;

/// Application state injected into handlers.
pub struct AppState<G> {
    pub handler: Arc<SubmissionHandler<G>>,
    pub trust_forwarded_for: bool,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            trust_forwarded_for: self.trust_forwarded_for,
        }
    }
}

/// HTTP server for the contact service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server storing accepted submissions through `gateway`.
    pub fn new<G: PersistenceGateway>(config: ServiceConfig, gateway: G) -> Self {
        let limiter = RateLimiter::new(&config.rate_limit);
        let handler = SubmissionHandler::new(
            limiter,
            gateway,
            Duration::from_secs(config.persistence.timeout_secs),
        );
        Self::with_handler(config, handler)
    }

    /// Create a server around a prepared handler.
    pub fn with_handler<G: PersistenceGateway>(
        config: ServiceConfig,
        handler: SubmissionHandler<G>,
    ) -> Self {
        let state = AppState {
            handler: Arc::new(handler),
            trust_forwarded_for: config.rate_limit.trust_forwarded_for,
        };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<G: PersistenceGateway>(config: &ServiceConfig, state: AppState<G>) -> Router {
        let router = contact::router(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::map_response(json_rejections));

        let router = if config.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        };

        with_request_tracing(router)
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
