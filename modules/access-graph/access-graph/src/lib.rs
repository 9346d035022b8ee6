//! Access Graph Module
//!
//! Tracks which developers hold which privilege on which cloud resources,
//! and answers graph-shaped questions and audit reports over those records.
//!
//! ## Architecture
//!
//! ### Contract Layer (`access-graph-sdk`)
//! - `AccessGraphClientV1` trait, models, report types, `AccessGraphError`
//!
//! ### API Layer (`access_graph::api`)
//! - `rest/` - axum routes, handlers, DTOs and problem mapping
//! - **Rule:** may import `domain::service` and `domain::error`
//!
//! ### Domain Layer (`access_graph::domain`)
//! - `service/` - entity store, permission graph, queries, analytics
//! - `repos.rs` - repository ports implemented by the storage layer
//! - `error.rs` - domain error taxonomy
//! - **Rule:** MUST NOT import `api::*`
//!
//! ### Infrastructure Layer (`access_graph::infra`)
//! - `storage/entity` - `SeaORM` entities
//! - `storage/migrations` - schema, including the unique
//!   `(developer_id, resource_id)` index that backs the one-edge-per-pair rule
//! - `storage/*_sea_repo.rs` - repository implementations
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use access_graph_sdk::{
    AccessGraphClientV1, AccessGraphError, CloudResource, CloudType, Developer, NewCloudResource,
    NewDeveloper, NewPermission, Permission, PermissionLevel,
};

pub mod config;
pub use config::{AccessGraphConfig, DeletePolicy};

pub mod module;
pub use module::AccessGraphModule;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
