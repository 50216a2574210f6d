use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use serde_json::json;
use thiserror::Error;

/// Errors a request can fail with. Collaborator failures (database, AI) never
/// show up here: they degrade the response instead of failing it.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body.");
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }
            AppError::Validation(err) => {
                tracing::debug!(error = %err, "Request failed validation.");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
