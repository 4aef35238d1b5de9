//! The backing REST service: users, products, and orders over HTTP.

mod error;
mod routes;
mod state;
pub mod store;

pub use error::{ApiError, ServiceError};
pub use routes::API_KEY_HEADER;
pub use state::ServiceState;
pub use store::Store;

use std::io;
use std::net::SocketAddr;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::BridgeConfig;

/// Build the service router over `state`.
pub fn router(state: ServiceState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route(
            "/api/users/{id}",
            get(routes::get_user).delete(routes::delete_user),
        )
        .route("/api/products", get(routes::list_products))
        .route("/api/orders", post(routes::create_order))
        .route("/api/admin/stats", get(routes::stats))
        .route("/api/admin/reset", post(routes::reset))
        .fallback(routes::not_found)
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!(method = %request.method(), path = %request.uri().path(), "request");
    next.run(request).await
}

/// Serve on an already-bound listener until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    state: ServiceState,
    shutdown: CancellationToken,
) -> Result<(), ServiceError> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(ServiceError::Serve)
}

/// A service running on a background task.
#[derive(Debug)]
pub struct RunningService {
    addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<Result<(), ServiceError>>,
}

impl RunningService {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for the server task.
    pub async fn shutdown(self) -> Result<(), ServiceError> {
        self.shutdown.cancel();
        self.handle
            .await
            .map_err(|e| ServiceError::Serve(io::Error::other(e)))?
    }
}

/// Bind `addr` (port 0 picks a free port) and serve in the background.
pub async fn spawn(addr: &str, state: ServiceState) -> Result<RunningService, ServiceError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServiceError::bind(addr, source))?;
    let local = listener.local_addr().map_err(ServiceError::Serve)?;
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(serve(listener, state, shutdown.clone()));
    Ok(RunningService {
        addr: local,
        shutdown,
        handle,
    })
}

/// Run the seeded service on the configured host and port until Ctrl-C.
pub async fn run(config: &BridgeConfig) -> Result<(), ServiceError> {
    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServiceError::bind(addr.as_str(), source))?;

    info!(
        url = %config.service_base_url(),
        admin_enabled = config.api_key.is_some(),
        "microservice started"
    );

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutting down");
        }
        signal.cancel();
    });

    let state = ServiceState::new(Store::seeded(), config.api_key.clone());
    serve(listener, state, shutdown).await
}
