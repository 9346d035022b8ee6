use access_graph_sdk::{AccessGraphError, EntityKind, EnumParseError};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity_kind} not found: {id}")]
    NotFound { entity_kind: EntityKind, id: i64 },

    #[error("Developer with email '{email}' already exists")]
    DuplicateEmail { email: String },

    #[error("Permission already exists for developer {developer_id} and resource {resource_id}")]
    DuplicateEdge { developer_id: i64, resource_id: i64 },

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidEnumeration { field: String, value: String },

    #[error("{entity_kind} {id} still has {count} dependent permission(s)")]
    HasDependents {
        entity_kind: EntityKind,
        id: i64,
        count: u64,
    },

    /// A write referenced a row that disappeared (foreign key violation).
    /// Services resolve this into a precise `NotFound` or `HasDependents`.
    #[error("Referenced record is missing: {message}")]
    ReferenceViolation { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
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

    pub fn invalid_enumeration(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnumeration {
            field: field.into(),
            value: value.into(),
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

    pub fn reference_violation(message: impl Into<String>) -> Self {
        Self::ReferenceViolation {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<EnumParseError> for DomainError {
    fn from(e: EnumParseError) -> Self {
        Self::invalid_enumeration(e.field, e.value)
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for AccessGraphError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { entity_kind, id } => Self::not_found(entity_kind, id),
            DomainError::DuplicateEmail { email } => Self::duplicate_email(email),
            DomainError::DuplicateEdge {
                developer_id,
                resource_id,
            } => Self::duplicate_edge(developer_id, resource_id),
            DomainError::HasDependents {
                entity_kind,
                id,
                count,
            } => Self::has_dependents(entity_kind, id, count),
            DomainError::InvalidEnumeration { field, value } => {
                Self::invalid_enumeration(field, value)
            }
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::ReferenceViolation { .. } | DomainError::Database { .. } => {
                Self::internal()
            }
        }
    }
}
