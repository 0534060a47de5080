//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single failure type every service
//! operation returns. Callers see one of a small set of typed failures:
//! missing identity, missing membership, bad sign-in, missing entities and
//! storage faults, plus the input-shaped errors produced by validation.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can
//! return it directly, and provides `From` conversions for the storage,
//! validation, JWT and bcrypt errors so `?` works throughout the crate.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// No resolvable caller identity (HTTP 401).
    Unauthenticated,
    /// The caller is authenticated but not a member of the target list (HTTP 403).
    Forbidden,
    /// Sign-in with an unknown email or a wrong password (HTTP 401).
    /// Both cases share one message so accounts cannot be enumerated.
    InvalidCredentials,
    /// A referenced entity does not exist (HTTP 404).
    NotFound(String),
    /// The persistence gateway could not serve the request (HTTP 503).
    StorageUnavailable(String),
    /// Malformed or conflicting request (HTTP 400).
    BadRequest(String),
    /// Input failed validation (HTTP 422 Unprocessable Entity).
    ValidationError(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthenticated => write!(f, "Authentication required. Please sign in"),
            AppError::Forbidden => write!(f, "You are not a member of this task list"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::StorageUnavailable(msg) => write!(f, "Storage Unavailable: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message placed in the JSON error body.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::ValidationError(msg) => {
                msg.clone()
            }
            // Storage and internal details stay in the logs.
            AppError::StorageUnavailable(_) => "Storage temporarily unavailable".to_string(),
            AppError::InternalServerError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects with a JSON body.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message()
        }))
    }
}

/// Converts gateway failures.
///
/// A duplicate key can only come from registering an email twice, everything
/// else is a storage fault that is surfaced without retry.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Duplicate(_) => AppError::BadRequest("Email already registered".into()),
            StoreError::Unavailable(msg) => {
                log::error!("persistence gateway unavailable: {}", msg);
                AppError::StorageUnavailable(msg)
            }
        }
    }
}

/// Converts `sqlx::Error` by way of the gateway's own classification.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        StoreError::from(error).into()
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// Only field names and failed rule codes are kept, e.g.
/// `"title: length"`. The rejected values never reach the response body.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        let mut fields: Vec<String> = error
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let codes: Vec<&str> = errors.iter().map(|e| e.code.as_ref()).collect();
                format!("{}: {}", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        AppError::ValidationError(fields.join("; "))
    }
}

/// Token signing failures are server faults; verification never reaches here
/// because unresolvable tokens mean "anonymous".
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InternalServerError(format!("Failed to generate token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
