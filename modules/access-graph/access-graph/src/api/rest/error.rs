use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// RFC 9457 problem details body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl Problem {
    pub fn new(
        status: StatusCode,
        type_url: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            type_url: type_url.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, Problem>;

const TYPE_NOT_FOUND: &str = "urn:access-graph:error:not-found";
const TYPE_CONFLICT: &str = "urn:access-graph:error:conflict";
const TYPE_INVALID_ENUMERATION: &str = "urn:access-graph:error:invalid-enumeration";
const TYPE_VALIDATION: &str = "urn:access-graph:error:validation";
const TYPE_INTERNAL: &str = "urn:access-graph:error:internal";

/// Map domain error to RFC 9457 Problem
pub fn domain_error_to_problem(e: &DomainError) -> Problem {
    match e {
        DomainError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, TYPE_NOT_FOUND, "Not Found", e.to_string())
        }
        DomainError::DuplicateEmail { .. }
        | DomainError::DuplicateEdge { .. }
        | DomainError::HasDependents { .. } => {
            Problem::new(StatusCode::CONFLICT, TYPE_CONFLICT, "Conflict", e.to_string())
        }
        DomainError::InvalidEnumeration { .. } => Problem::new(
            StatusCode::BAD_REQUEST,
            TYPE_INVALID_ENUMERATION,
            "Invalid Enumeration Value",
            e.to_string(),
        ),
        DomainError::Validation { .. } => Problem::new(
            StatusCode::BAD_REQUEST,
            TYPE_VALIDATION,
            "Validation Failed",
            e.to_string(),
        ),
        DomainError::ReferenceViolation { .. } | DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                TYPE_INTERNAL,
                "Internal Server Error",
                "An internal database error occurred",
            )
        }
    }
}

/// Implement Into<Problem> for `DomainError` so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e)
    }
}
