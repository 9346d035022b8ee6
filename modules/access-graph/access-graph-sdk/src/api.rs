//! Public API trait for the access graph.

use async_trait::async_trait;

use crate::errors::AccessGraphError;
use crate::models::{
    CloudResource, CloudResourceUpdate, CloudType, Developer, DeveloperResources,
    DeveloperUpdate, DeveloperWithPermissions, ListQuery, NewCloudResource, NewDeveloper,
    NewPermission, Permission, PermissionFilter, PermissionUpdate, PermissionWithDeveloper,
    PermissionWithResource, ResourceWithPermissions,
};
use crate::reports::{CloudFootprint, HighPrivilegeReview, WriteAccessAudit};

/// In-process contract of the access graph module.
///
/// Every failure is returned as a typed [`AccessGraphError`]; nothing is
/// retried on the caller's behalf.
#[async_trait]
pub trait AccessGraphClientV1: Send + Sync {
    // -- developers ---------------------------------------------------------

    /// # Errors
    /// `DuplicateEmail` if another developer already uses the email.
    async fn create_developer(&self, new: NewDeveloper) -> Result<Developer, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the developer does not exist.
    async fn get_developer(&self, id: i64) -> Result<Developer, AccessGraphError>;

    /// # Errors
    /// `Internal` on storage failure.
    async fn list_developers(&self, query: ListQuery) -> Result<Vec<Developer>, AccessGraphError>;

    /// # Errors
    /// `NotFound`, or `DuplicateEmail` on an email collision.
    async fn update_developer(
        &self,
        id: i64,
        update: DeveloperUpdate,
    ) -> Result<Developer, AccessGraphError>;

    /// # Errors
    /// `NotFound`, or `HasDependents` when permissions still reference the
    /// developer under the reject deletion policy.
    async fn delete_developer(&self, id: i64) -> Result<(), AccessGraphError>;

    // -- cloud resources ----------------------------------------------------

    /// # Errors
    /// `Validation` on an empty name.
    async fn create_resource(
        &self,
        new: NewCloudResource,
    ) -> Result<CloudResource, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the resource does not exist.
    async fn get_resource(&self, id: i64) -> Result<CloudResource, AccessGraphError>;

    /// # Errors
    /// `Internal` on storage failure.
    async fn list_resources(
        &self,
        cloud_type: Option<CloudType>,
        query: ListQuery,
    ) -> Result<Vec<CloudResource>, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the resource does not exist.
    async fn update_resource(
        &self,
        id: i64,
        update: CloudResourceUpdate,
    ) -> Result<CloudResource, AccessGraphError>;

    /// # Errors
    /// `NotFound`, or `HasDependents` under the reject deletion policy.
    async fn delete_resource(&self, id: i64) -> Result<(), AccessGraphError>;

    // -- permission edges ---------------------------------------------------

    /// # Errors
    /// `NotFound` for a missing endpoint, `DuplicateEdge` if the pair is already linked.
    async fn create_permission(&self, new: NewPermission)
    -> Result<Permission, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the edge does not exist.
    async fn get_permission(&self, id: i64) -> Result<Permission, AccessGraphError>;

    /// # Errors
    /// `NotFound` for the edge or a new endpoint, `DuplicateEdge` if the new pair
    /// is held by another edge.
    async fn update_permission(
        &self,
        id: i64,
        update: PermissionUpdate,
    ) -> Result<Permission, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the edge does not exist.
    async fn delete_permission(&self, id: i64) -> Result<(), AccessGraphError>;

    /// # Errors
    /// `Internal` on storage failure.
    async fn list_permissions(
        &self,
        filter: PermissionFilter,
        query: ListQuery,
    ) -> Result<Vec<Permission>, AccessGraphError>;

    // -- graph queries ------------------------------------------------------

    /// # Errors
    /// `NotFound` if the developer does not exist.
    async fn permissions_for_developer(
        &self,
        developer_id: i64,
    ) -> Result<Vec<PermissionWithResource>, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the resource does not exist.
    async fn permissions_for_resource(
        &self,
        resource_id: i64,
    ) -> Result<Vec<PermissionWithDeveloper>, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the developer does not exist.
    async fn resources_for_developer(
        &self,
        developer_id: i64,
        cloud_type: Option<CloudType>,
    ) -> Result<DeveloperResources, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the developer does not exist.
    async fn developer_detailed(
        &self,
        developer_id: i64,
    ) -> Result<DeveloperWithPermissions, AccessGraphError>;

    /// # Errors
    /// `NotFound` if the resource does not exist.
    async fn resource_detailed(
        &self,
        resource_id: i64,
    ) -> Result<ResourceWithPermissions, AccessGraphError>;

    // -- analytics ----------------------------------------------------------

    /// `threshold: None` uses the configured default.
    ///
    /// # Errors
    /// `Internal` on storage failure.
    async fn write_access_audit(
        &self,
        cloud_type: Option<CloudType>,
        threshold: Option<usize>,
    ) -> Result<WriteAccessAudit, AccessGraphError>;

    /// # Errors
    /// `Internal` on storage failure.
    async fn cloud_footprint(&self, cloud_type: CloudType)
    -> Result<CloudFootprint, AccessGraphError>;

    /// `minimum_resources: None` uses the configured default.
    ///
    /// # Errors
    /// `Internal` on storage failure.
    async fn high_privilege_review(
        &self,
        minimum_resources: Option<usize>,
    ) -> Result<HighPrivilegeReview, AccessGraphError>;
}
