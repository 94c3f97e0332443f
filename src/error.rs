/// Unified error type for the HTTP API
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::session::SessionError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed JSON, bad path ids, and similar client mistakes
    #[error("{0}")]
    BadRequest(String),

    /// Body parsed but failed field rules
    #[error("Invalid input")]
    Validation(#[from] ValidationErrors),

    /// No live admin session
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Entity name, e.g. "Project"
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(_) => {
                ApiError::Conflict("Admin with this username already exists".to_string())
            }
            StoreError::PasswordHash(e) => ApiError::Internal(e),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match &*error.code {
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        "email" => "Invalid email address".to_string(),
        code => format!("Invalid value ({})", code),
    }
}

/// Field errors keyed by their wire (camelCase) names.
pub fn field_error_map(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (to_camel_case(&field), errs.iter().map(describe).collect()))
        .collect()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message,
                    errors: None,
                },
            ),
            ApiError::Validation(ref errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "Invalid input".to_string(),
                    errors: Some(field_error_map(errors)),
                },
            ),
            ApiError::Unauthorized | ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    message: self.to_string(),
                    errors: None,
                },
            ),
            ApiError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message: self.to_string(),
                    errors: None,
                },
            ),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    message,
                    errors: None,
                },
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        // Don't leak details
                        message: "Internal server error".to_string(),
                        errors: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
