use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use super::store::OrderError;

/// Failures starting or running the HTTP service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to bind service on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("service terminated unexpectedly: {0}")]
    Serve(#[source] io::Error),
}

impl ServiceError {
    pub(crate) fn bind(addr: impl Into<String>, source: io::Error) -> Self {
        Self::Bind {
            addr: addr.into(),
            source,
        }
    }
}

/// A JSON error response: status plus body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Bad request", "message": message.into() }),
        )
    }

    pub fn user_not_found(user_id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            json!({ "error": "User not found", "userId": user_id }),
        )
    }

    pub fn forbidden() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            json!({ "error": "Forbidden", "message": "Admin access required" }),
        )
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            json!({ "error": "Not found", "path": path }),
        )
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        let label = err.to_string();
        match err {
            OrderError::UserNotFound { user_id } => Self::user_not_found(&user_id),
            OrderError::ProductNotFound { product_id } => Self::new(
                StatusCode::NOT_FOUND,
                json!({ "error": label, "productId": product_id }),
            ),
            OrderError::InsufficientStock {
                available,
                requested,
            } => Self::new(
                StatusCode::BAD_REQUEST,
                json!({ "error": label, "available": available, "requested": requested }),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
