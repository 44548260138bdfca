//! Error taxonomy (spec §7) and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::backend::BackendError;

/// Structural defects in a [`crate::model::SolverRequest`], caught before any
/// symbolic work begins.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("undeclared name `{0}` referenced in request")]
    UndeclaredName(String),

    #[error("clause at index {0} is empty")]
    EmptyClause(usize),

    #[error("transition for `{name}` has no endpoints")]
    EmptyTransition { name: String },

    #[error("transition for `{name}` declares more endpoints ({count}) than distinct boolean values exist")]
    TooManyEndpoints { name: String, count: usize },

    #[error("trace length K must be at least 1 (got {0})")]
    TraceTooShort(usize),

    #[error("`{0}` is declared as both a state variable and a PBT variable")]
    DuplicateName(String),
}

/// Top-level error type returned by the HTTP surface (spec §7's table).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    MalformedJson(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("solver exceeded its time budget")]
    Timeout,

    #[error("backend failure: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

impl ApiError {
    fn code_and_tag(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MalformedJson(_) => (StatusCode::BAD_REQUEST, "malformed_json"),
            ApiError::Validation(ValidationError::UndeclaredName(_)) => {
                (StatusCode::BAD_REQUEST, "undeclared_name")
            }
            ApiError::Validation(ValidationError::EmptyClause(_)) => {
                (StatusCode::BAD_REQUEST, "empty_clause")
            }
            ApiError::Validation(
                ValidationError::EmptyTransition { .. } | ValidationError::TooManyEndpoints { .. },
            ) => (StatusCode::BAD_REQUEST, "bad_transition"),
            ApiError::Validation(ValidationError::TraceTooShort(_)) => {
                (StatusCode::BAD_REQUEST, "bad_trace_length")
            }
            ApiError::Validation(ValidationError::DuplicateName(_)) => {
                (StatusCode::BAD_REQUEST, "duplicate_name")
            }
            ApiError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            ApiError::Backend(_) => (StatusCode::INTERNAL_SERVER_ERROR, "backend_failure"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, tag) = self.code_and_tag();
        let body = ErrorBody { error: tag, detail: self.to_string() };
        (status, Json(body)).into_response()
    }
}
