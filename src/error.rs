//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a handler can hit is one of its variants, and each variant maps to
//! exactly one HTTP status code.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly. Every response body has the shape `{"message": "..."}`. Server-side
//! failures are logged with their detail and answered with a generic message.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned for signup payloads that fail validation.
pub const INVALID_DATA_MESSAGE: &str = "Invalid data entered. Please enter correct data";
/// Message returned for a failed login. Identical for unknown users and wrong passwords.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";
/// Message returned instead of any internal error detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The request payload is malformed or fails validation (HTTP 400).
    Validation(String),
    /// Login failed. Does not say which of username or password was wrong (HTTP 400).
    InvalidCredentials,
    /// The request collides with existing state, e.g. a taken username (HTTP 400).
    Conflict(String),
    /// The bearer token is missing or failed verification (HTTP 403).
    Forbidden(String),
    /// The requested record does not exist (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from the data-access layer (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid Credentials"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl AppError {
    /// The client-facing message. Internal details never leave the process.
    pub fn client_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg,
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.client_message()
        }))
    }
}

/// `RowNotFound` becomes `NotFound`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Field details are dropped; the client only learns that the payload was invalid.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        log::debug!("payload rejected: {}", error);
        AppError::Validation(INVALID_DATA_MESSAGE.into())
    }
}

/// Expired, malformed and wrongly signed tokens all collapse into one 403.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("token verification error: {}", error);
        AppError::Forbidden("Token verification failed!".into())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases: Vec<(AppError, u16)> = vec![
            (AppError::Validation("bad".into()), 400),
            (AppError::InvalidCredentials, 400),
            (AppError::Conflict("taken".into()), 400),
            (AppError::Forbidden("no".into()), 403),
            (AppError::NotFound("gone".into()), 404),
            (AppError::InternalServerError("boom".into()), 500),
            (AppError::DatabaseError("down".into()), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{}", error);
        }
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".into());
        assert_eq!(error.client_message(), INTERNAL_ERROR_MESSAGE);

        let error = AppError::InternalServerError("hash failure".into());
        assert_eq!(error.client_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_invalid_credentials_message_is_constant() {
        assert_eq!(
            AppError::InvalidCredentials.client_message(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        match AppError::from(sqlx::Error::RowNotFound) {
            AppError::NotFound(_) => {}
            other => panic!("Unexpected mapping: {:?}", other),
        }
    }
}
