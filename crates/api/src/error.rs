use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_accounts::AccountError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        error!(error = ?error, "internal error");
        Self::internal_server_error("Server error.")
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::ValidationFailed(_) => Self::bad_request(error.to_string()),
            AccountError::InvalidCredentials => Self::unauthorized(error.to_string()),
            AccountError::InvalidToken(_) => {
                Self::unauthorized("Invalid or expired token.")
            }
            AccountError::UserNotFound => Self::not_found(error.to_string()),
            AccountError::EmailAlreadyExists => Self::conflict(error.to_string()),
            AccountError::PasswordHash(_)
            | AccountError::TokenCreationFailed(_)
            | AccountError::Database(_) => {
                // Internal detail stays in the log, not the response body.
                error!(error = %error, "account error");
                Self::internal_server_error("Server error.")
            }
        }
    }
}
