use crate::presentation::rest::dto::MessageResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use herald_ports::HeraldError;
use tracing::error;

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_body(reason: impl std::fmt::Display) -> Self {
        Self::bad_request(format!("Invalid request body: {}", reason))
    }
}

impl From<HeraldError> for ApiError {
    fn from(err: HeraldError) -> Self {
        match err {
            HeraldError::Validation(e) => Self::bad_request(e.to_string()),
            HeraldError::SignalNotFound(_) | HeraldError::TradeNotFound(_) => {
                Self::not_found(err.to_string())
            }
            HeraldError::Storage(detail) => {
                // Storage details stay in the logs
                error!(%detail, "Storage failure");
                Self::internal("Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(MessageResponse::new(self.message));
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}
