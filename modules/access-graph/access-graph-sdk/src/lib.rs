//! Access Graph SDK
//!
//! This crate provides the public API for the `access_graph` module:
//!
//! - [`AccessGraphClientV1`] - Public API trait for consumers
//! - [`Developer`], [`CloudResource`], [`Permission`] - Graph records
//! - [`CloudType`], [`PermissionLevel`] - Closed enumerations
//! - [`WriteAccessAudit`], [`CloudFootprint`], [`HighPrivilegeReview`] - Reports
//! - [`AccessGraphError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use access_graph_sdk::{AccessGraphClientV1, NewDeveloper};
//!
//! let dev = client
//!     .create_developer(NewDeveloper::new("Alice", "alice@x.com"))
//!     .await?;
//! let grants = client.permissions_for_developer(dev.id).await?;
//! ```

pub mod api;
pub mod errors;
pub mod models;
pub mod reports;

pub use api::AccessGraphClientV1;
pub use errors::{AccessGraphError, EnumParseError};
pub use models::{
    CloudResource, CloudResourceUpdate, CloudType, Developer, DeveloperResources,
    DeveloperUpdate, DeveloperWithPermissions, EntityKind, ListQuery, NewCloudResource,
    NewDeveloper, NewPermission, Permission, PermissionFilter, PermissionLevel,
    PermissionUpdate, PermissionWithDeveloper, PermissionWithResource, ResourceWithPermissions,
};
pub use reports::{
    CloudFootprint, HighPrivilegeReview, LevelDistribution, PrivilegedDeveloper,
    ResourceAccessCount, ResourceWriteAccess, WriteAccessAudit, WriteGrant,
};
