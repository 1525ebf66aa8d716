use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fakeartist::CheckError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Each variant maps onto an HTTP status; the body is always `{ "error": ... }`.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the artist check pipeline.
    Check(CheckError),
    /// The query string or JSON body could not be read.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<CheckError> for AppError {
    fn from(err: CheckError) -> Self {
        AppError::Check(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Check(err) => {
                error!("CheckError: {:?}", err);
                let status = match err {
                    CheckError::InvalidInput => StatusCode::BAD_REQUEST,
                    CheckError::NotFound(_) => StatusCode::NOT_FOUND,
                    CheckError::Metadata(_)
                    | CheckError::Scoring(_)
                    | CheckError::MissingCollaborator(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            AppError::BadRequest(message) => {
                error!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
