//! REST surface of the access graph.
//!
//! Routes orchestrate but don't contain business logic: handlers parse DTOs,
//! call the domain services and map `DomainError` into problem responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
