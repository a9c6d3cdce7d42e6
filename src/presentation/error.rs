use crate::domain::error::DomainError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, something went wrong.";
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required.";

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

// Failures collapse to a generic 400; only not-found and missing
// credentials get their own status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        let message = match self {
            ApiError::NotFound(msg) => {
                warn!(error = %error_msg, status = %status, "Resource not found");
                msg.clone()
            }
            ApiError::Unauthorized(_) => {
                warn!(error = %error_msg, status = %status, "Unauthorized");
                UNAUTHORIZED_MESSAGE.to_string()
            }
            ApiError::BadRequest(_) => {
                warn!(error = %error_msg, status = %status, "Bad request");
                GENERIC_ERROR_MESSAGE.to_string()
            }
            ApiError::Internal(_) => {
                error!(error = %error_msg, status = %status, "Internal error");
                GENERIC_ERROR_MESSAGE.to_string()
            }
        };

        HttpResponse::build(status).json(ErrorResponse { message })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => ApiError::BadRequest(msg.clone()),
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            // Rejected credentials are reported like any other bad request.
            Some(DomainError::Unauthorized(msg)) => ApiError::BadRequest(msg.clone()),
            Some(DomainError::Unauthenticated(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Internal(err.to_string()),
        }
    }
}
