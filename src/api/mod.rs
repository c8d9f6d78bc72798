//! REST API module.
//!
//! Contains all API routes and handlers. Success bodies are the bare
//! entity as JSON; errors render through [`crate::errors::AppError`].

mod comments;
mod destinations;
mod partners;

pub use comments::*;
pub use destinations::*;
pub use partners::*;

use axum::{
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};

/// Response type for JSON handlers.
pub type ApiResult<T> = Result<Json<T>, crate::errors::AppError>;

/// OPTIONS handler; every route answers preflight with a plain 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Handler for verbs a route deliberately rejects.
///
/// Responds 403 with a plain-text line naming the method and path. The
/// answer is the same for every caller, authenticated or not.
pub async fn method_not_supported(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        format!("{} operation not supported on {}", method, uri.path()),
    )
}
