use std::sync::Arc;

use access_graph_sdk::{
    CloudResource, CloudType, Developer, DeveloperResources, DeveloperWithPermissions,
    EntityKind, ListQuery, Permission, PermissionFilter, PermissionWithDeveloper,
    PermissionWithResource, ResourceWithPermissions,
};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::repos::{DevelopersRepository, PermissionsRepository, ResourcesRepository};
use crate::domain::service::DbProvider;

/// Read-side graph queries.
///
/// Results are snapshots: no locks are taken, and two calls may observe
/// different states of the graph. Edge listings are ordered by ascending
/// permission id, which is insertion order.
pub struct QueryService<DR: DevelopersRepository, RR: ResourcesRepository, PR: PermissionsRepository>
{
    db: Arc<DbProvider>,
    developers: Arc<DR>,
    resources: Arc<RR>,
    permissions: Arc<PR>,
}

impl<DR: DevelopersRepository, RR: ResourcesRepository, PR: PermissionsRepository>
    QueryService<DR, RR, PR>
{
    pub fn new(
        db: Arc<DbProvider>,
        developers: Arc<DR>,
        resources: Arc<RR>,
        permissions: Arc<PR>,
    ) -> Self {
        Self {
            db,
            developers,
            resources,
            permissions,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_developers(&self, query: ListQuery) -> Result<Vec<Developer>, DomainError> {
        let developers = self.developers.list(&*self.db, query).await?;
        tracing::debug!("Listed {} developers", developers.len());
        Ok(developers)
    }

    #[instrument(skip(self))]
    pub async fn list_resources(
        &self,
        cloud_type: Option<CloudType>,
        query: ListQuery,
    ) -> Result<Vec<CloudResource>, DomainError> {
        let resources = self
            .resources
            .list(&*self.db, cloud_type, query)
            .await?;
        tracing::debug!("Listed {} cloud resources", resources.len());
        Ok(resources)
    }

    /// Both filters are optional and combine with AND.
    #[instrument(skip(self))]
    pub async fn list_permissions(
        &self,
        filter: PermissionFilter,
        query: ListQuery,
    ) -> Result<Vec<Permission>, DomainError> {
        let permissions = self
            .permissions
            .list(&*self.db, filter, query)
            .await?;
        tracing::debug!("Listed {} permissions", permissions.len());
        Ok(permissions)
    }

    #[instrument(skip(self))]
    pub async fn permissions_for_developer(
        &self,
        developer_id: i64,
    ) -> Result<Vec<PermissionWithResource>, DomainError> {
        tracing::debug!("Listing permissions held by developer");

        self.developer(developer_id).await?;
        self.permissions
            .list_with_resources(&*self.db, developer_id)
            .await
    }

    #[instrument(skip(self))]
    pub async fn permissions_for_resource(
        &self,
        resource_id: i64,
    ) -> Result<Vec<PermissionWithDeveloper>, DomainError> {
        tracing::debug!("Listing permissions granted on resource");

        self.resource(resource_id).await?;
        self.permissions
            .list_with_developers(&*self.db, resource_id)
            .await
    }

    /// Resources a developer can reach, optionally narrowed to one cloud.
    #[instrument(skip(self))]
    pub async fn resources_for_developer(
        &self,
        developer_id: i64,
        cloud_type: Option<CloudType>,
    ) -> Result<DeveloperResources, DomainError> {
        let developer = self.developer(developer_id).await?;
        let resources: Vec<_> = self
            .permissions
            .list_with_resources(&*self.db, developer_id)
            .await?
            .into_iter()
            .filter(|p| cloud_type.is_none_or(|ct| p.cloud_resource.cloud_type == ct))
            .collect();

        Ok(DeveloperResources {
            developer,
            cloud_type,
            total_resources: resources.len(),
            resources,
        })
    }

    #[instrument(skip(self))]
    pub async fn developer_detailed(
        &self,
        developer_id: i64,
    ) -> Result<DeveloperWithPermissions, DomainError> {
        let developer = self.developer(developer_id).await?;
        let permissions = self
            .permissions
            .list_with_resources(&*self.db, developer_id)
            .await?;
        Ok(DeveloperWithPermissions {
            developer,
            permissions,
        })
    }

    #[instrument(skip(self))]
    pub async fn resource_detailed(
        &self,
        resource_id: i64,
    ) -> Result<ResourceWithPermissions, DomainError> {
        let resource = self.resource(resource_id).await?;
        let permissions = self
            .permissions
            .list_with_developers(&*self.db, resource_id)
            .await?;
        Ok(ResourceWithPermissions {
            resource,
            permissions,
        })
    }

    async fn developer(&self, id: i64) -> Result<Developer, DomainError> {
        self.developers
            .get(&*self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Developer, id))
    }

    async fn resource(&self, id: i64) -> Result<CloudResource, DomainError> {
        self.resources
            .get(&*self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::CloudResource, id))
    }
}
