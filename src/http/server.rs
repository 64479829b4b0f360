//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with every storefront and admin route
//! - Wire up middleware (tracing, request ID, body limit)
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::admin;
use crate::config::schema::SecurityConfig;
use crate::config::StorefrontConfig;
use crate::db::{invoke, DbResult, ProcedureCall, ProcedureClient, RecordSet};
use crate::health;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::storefront;
use crate::views::Views;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn ProcedureClient>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(db: Arc<dyn ProcedureClient>, views: Arc<Views>) -> Self {
        Self { db, views }
    }

    /// Run one stored procedure through the shared client.
    pub async fn call(&self, call: &ProcedureCall) -> DbResult<RecordSet> {
        invoke(self.db.as_ref(), call).await
    }
}

/// HTTP server for the storefront.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: &StorefrontConfig, state: AppState) -> Self {
        Self {
            router: build_router(&config.security, state),
        }
    }

    /// Run the server until Ctrl+C/SIGTERM or until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all routes and middleware layers.
pub fn build_router(security: &SecurityConfig, state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(storefront::router())
        .merge(admin::router())
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(security.max_body_size))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
}
