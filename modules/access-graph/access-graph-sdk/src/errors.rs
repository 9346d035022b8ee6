//! Public error types for the `access_graph` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

use crate::models::EntityKind;

/// A text value that is not a member of a closed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value '{value}' for field '{field}'")]
pub struct EnumParseError {
    pub field: &'static str,
    pub value: String,
}

impl EnumParseError {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Errors that can be returned by the `AccessGraphClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessGraphError {
    /// Referenced record does not exist.
    #[error("{entity_kind} not found: {id}")]
    NotFound { entity_kind: EntityKind, id: i64 },

    /// Another developer already uses this (normalised) email.
    #[error("Developer with email '{email}' already exists")]
    DuplicateEmail { email: String },

    /// The `(developer, resource)` pair already has an edge.
    #[error("Permission already exists for developer {developer_id} and resource {resource_id}")]
    DuplicateEdge { developer_id: i64, resource_id: i64 },

    /// Deletion refused: permissions still reference the record.
    #[error("{entity_kind} {id} still has {count} dependent permission(s)")]
    HasDependents {
        entity_kind: EntityKind,
        id: i64,
        count: u64,
    },

    /// A cloud type or permission level outside the fixed set.
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidEnumeration { field: String, value: String },

    /// Input failed validation.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl AccessGraphError {
    #[must_use]
    pub fn not_found(entity_kind: EntityKind, id: i64) -> Self {
        Self::NotFound { entity_kind, id }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    #[must_use]
    pub fn duplicate_edge(developer_id: i64, resource_id: i64) -> Self {
        Self::DuplicateEdge {
            developer_id,
            resource_id,
        }
    }

    #[must_use]
    pub fn has_dependents(entity_kind: EntityKind, id: i64, count: u64) -> Self {
        Self::HasDependents {
            entity_kind,
            id,
            count,
        }
    }

    /// True for the variants the REST layer answers with `409 Conflict`.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEmail { .. } | Self::DuplicateEdge { .. } | Self::HasDependents { .. }
        )
    }

    pub fn invalid_enumeration(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnumeration {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<EnumParseError> for AccessGraphError {
    fn from(e: EnumParseError) -> Self {
        Self::invalid_enumeration(e.field, e.value)
    }
}
