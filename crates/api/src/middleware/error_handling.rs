//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies. Expected
//! user mistakes (bad form input, wrong password) never reach this module:
//! handlers turn them into flash messages and redirects. What arrives here is
//! a missing resource or a failure of the stores.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use labslot_core::errors::LabError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::response::Redirect;
/// use labslot_api::middleware::error_handling::AppError;
/// use labslot_core::errors::LabError;
///
/// async fn handler(found: bool) -> Result<Redirect, AppError> {
///     if !found {
///         return Err(AppError(LabError::NotFound("Slot not found".to_string())));
///     }
///     Ok(Redirect::to("/my_slots/"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub LabError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LabError::NotFound(_) => StatusCode::NOT_FOUND,
            LabError::Validation(_) => StatusCode::BAD_REQUEST,
            LabError::Authentication(_) => StatusCode::UNAUTHORIZED,
            LabError::Authorization(_) => StatusCode::FORBIDDEN,
            LabError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LabError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<LabError> for AppError {
    fn from(err: LabError) -> Self {
        AppError(err)
    }
}

/// Errors from the repositories arrive as `eyre::Report`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(LabError::Database(err))
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError(LabError::Internal(Box::new(err)))
    }
}

/// Maps a LabError to an HTTP response
pub fn map_error(err: LabError) -> Response {
    AppError(err).into_response()
}
