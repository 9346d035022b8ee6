//! Local (in-process) client for the access graph.

use std::sync::Arc;

use access_graph_sdk::{
    AccessGraphClientV1, AccessGraphError, CloudFootprint, CloudResource, CloudResourceUpdate,
    CloudType, Developer, DeveloperResources, DeveloperUpdate, DeveloperWithPermissions,
    HighPrivilegeReview, ListQuery, NewCloudResource, NewDeveloper, NewPermission, Permission,
    PermissionFilter, PermissionUpdate, PermissionWithDeveloper, PermissionWithResource,
    ResourceWithPermissions, WriteAccessAudit,
};
use async_trait::async_trait;

use super::error::DomainError;
use super::repos::{DevelopersRepository, PermissionsRepository, ResourcesRepository};
use super::service::AppServices;

/// Local client wrapping the domain services.
pub struct AccessGraphLocalClient<DR, RR, PR>
where
    DR: DevelopersRepository + 'static,
    RR: ResourcesRepository + 'static,
    PR: PermissionsRepository + 'static,
{
    services: Arc<AppServices<DR, RR, PR>>,
}

impl<DR, RR, PR> AccessGraphLocalClient<DR, RR, PR>
where
    DR: DevelopersRepository + 'static,
    RR: ResourcesRepository + 'static,
    PR: PermissionsRepository + 'static,
{
    #[must_use]
    pub(crate) fn new(services: Arc<AppServices<DR, RR, PR>>) -> Self {
        Self { services }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AccessGraphError {
    tracing::error!(operation = op, error = ?e, "access_graph call failed");
    e.into()
}

#[async_trait]
impl<DR, RR, PR> AccessGraphClientV1 for AccessGraphLocalClient<DR, RR, PR>
where
    DR: DevelopersRepository + 'static,
    RR: ResourcesRepository + 'static,
    PR: PermissionsRepository + 'static,
{
    async fn create_developer(&self, new: NewDeveloper) -> Result<Developer, AccessGraphError> {
        self.services
            .developers
            .create_developer(new)
            .await
            .map_err(|e| log_and_convert("create_developer", e))
    }

    async fn get_developer(&self, id: i64) -> Result<Developer, AccessGraphError> {
        self.services
            .developers
            .get_developer(id)
            .await
            .map_err(|e| log_and_convert("get_developer", e))
    }

    async fn list_developers(&self, query: ListQuery) -> Result<Vec<Developer>, AccessGraphError> {
        self.services
            .queries
            .list_developers(query)
            .await
            .map_err(|e| log_and_convert("list_developers", e))
    }

    async fn update_developer(
        &self,
        id: i64,
        update: DeveloperUpdate,
    ) -> Result<Developer, AccessGraphError> {
        self.services
            .developers
            .update_developer(id, update)
            .await
            .map_err(|e| log_and_convert("update_developer", e))
    }

    async fn delete_developer(&self, id: i64) -> Result<(), AccessGraphError> {
        self.services
            .developers
            .delete_developer(id)
            .await
            .map_err(|e| log_and_convert("delete_developer", e))
    }

    async fn create_resource(
        &self,
        new: NewCloudResource,
    ) -> Result<CloudResource, AccessGraphError> {
        self.services
            .resources
            .create_resource(new)
            .await
            .map_err(|e| log_and_convert("create_resource", e))
    }

    async fn get_resource(&self, id: i64) -> Result<CloudResource, AccessGraphError> {
        self.services
            .resources
            .get_resource(id)
            .await
            .map_err(|e| log_and_convert("get_resource", e))
    }

    async fn list_resources(
        &self,
        cloud_type: Option<CloudType>,
        query: ListQuery,
    ) -> Result<Vec<CloudResource>, AccessGraphError> {
        self.services
            .queries
            .list_resources(cloud_type, query)
            .await
            .map_err(|e| log_and_convert("list_resources", e))
    }

    async fn update_resource(
        &self,
        id: i64,
        update: CloudResourceUpdate,
    ) -> Result<CloudResource, AccessGraphError> {
        self.services
            .resources
            .update_resource(id, update)
            .await
            .map_err(|e| log_and_convert("update_resource", e))
    }

    async fn delete_resource(&self, id: i64) -> Result<(), AccessGraphError> {
        self.services
            .resources
            .delete_resource(id)
            .await
            .map_err(|e| log_and_convert("delete_resource", e))
    }

    async fn create_permission(
        &self,
        new: NewPermission,
    ) -> Result<Permission, AccessGraphError> {
        self.services
            .permissions
            .create_permission(new)
            .await
            .map_err(|e| log_and_convert("create_permission", e))
    }

    async fn get_permission(&self, id: i64) -> Result<Permission, AccessGraphError> {
        self.services
            .permissions
            .get_permission(id)
            .await
            .map_err(|e| log_and_convert("get_permission", e))
    }

    async fn update_permission(
        &self,
        id: i64,
        update: PermissionUpdate,
    ) -> Result<Permission, AccessGraphError> {
        self.services
            .permissions
            .update_permission(id, update)
            .await
            .map_err(|e| log_and_convert("update_permission", e))
    }

    async fn delete_permission(&self, id: i64) -> Result<(), AccessGraphError> {
        self.services
            .permissions
            .delete_permission(id)
            .await
            .map_err(|e| log_and_convert("delete_permission", e))
    }

    async fn list_permissions(
        &self,
        filter: PermissionFilter,
        query: ListQuery,
    ) -> Result<Vec<Permission>, AccessGraphError> {
        self.services
            .queries
            .list_permissions(filter, query)
            .await
            .map_err(|e| log_and_convert("list_permissions", e))
    }

    async fn permissions_for_developer(
        &self,
        developer_id: i64,
    ) -> Result<Vec<PermissionWithResource>, AccessGraphError> {
        self.services
            .queries
            .permissions_for_developer(developer_id)
            .await
            .map_err(|e| log_and_convert("permissions_for_developer", e))
    }

    async fn permissions_for_resource(
        &self,
        resource_id: i64,
    ) -> Result<Vec<PermissionWithDeveloper>, AccessGraphError> {
        self.services
            .queries
            .permissions_for_resource(resource_id)
            .await
            .map_err(|e| log_and_convert("permissions_for_resource", e))
    }

    async fn resources_for_developer(
        &self,
        developer_id: i64,
        cloud_type: Option<CloudType>,
    ) -> Result<DeveloperResources, AccessGraphError> {
        self.services
            .queries
            .resources_for_developer(developer_id, cloud_type)
            .await
            .map_err(|e| log_and_convert("resources_for_developer", e))
    }

    async fn developer_detailed(
        &self,
        developer_id: i64,
    ) -> Result<DeveloperWithPermissions, AccessGraphError> {
        self.services
            .queries
            .developer_detailed(developer_id)
            .await
            .map_err(|e| log_and_convert("developer_detailed", e))
    }

    async fn resource_detailed(
        &self,
        resource_id: i64,
    ) -> Result<ResourceWithPermissions, AccessGraphError> {
        self.services
            .queries
            .resource_detailed(resource_id)
            .await
            .map_err(|e| log_and_convert("resource_detailed", e))
    }

    async fn write_access_audit(
        &self,
        cloud_type: Option<CloudType>,
        threshold: Option<usize>,
    ) -> Result<WriteAccessAudit, AccessGraphError> {
        self.services
            .analytics
            .write_access_audit(cloud_type, threshold)
            .await
            .map_err(|e| log_and_convert("write_access_audit", e))
    }

    async fn cloud_footprint(
        &self,
        cloud_type: CloudType,
    ) -> Result<CloudFootprint, AccessGraphError> {
        self.services
            .analytics
            .cloud_footprint(cloud_type)
            .await
            .map_err(|e| log_and_convert("cloud_footprint", e))
    }

    async fn high_privilege_review(
        &self,
        minimum_resources: Option<usize>,
    ) -> Result<HighPrivilegeReview, AccessGraphError> {
        self.services
            .analytics
            .high_privilege_review(minimum_resources)
            .await
            .map_err(|e| log_and_convert("high_privilege_review", e))
    }
}
