use std::sync::Arc;

use access_graph_sdk::{
    CloudResource, CloudResourceUpdate, EntityKind, NewCloudResource, PermissionFilter,
};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::config::DeletePolicy;
use crate::domain::error::DomainError;
use crate::domain::repos::{PermissionsRepository, ResourcesRepository};
use crate::domain::service::validation::normalize_name;
use crate::domain::service::{DbProvider, ServiceConfig};

/// Cloud resources service. Resource names need not be unique.
pub struct ResourcesService<R: ResourcesRepository, PR: PermissionsRepository> {
    db: Arc<DbProvider>,
    repo: Arc<R>,
    permissions: Arc<PR>,
    config: ServiceConfig,
}

impl<R: ResourcesRepository, PR: PermissionsRepository> ResourcesService<R, PR> {
    pub fn new(
        db: Arc<DbProvider>,
        repo: Arc<R>,
        permissions: Arc<PR>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            db,
            repo,
            permissions,
            config,
        }
    }

    #[instrument(skip(self), fields(resource_id = id))]
    pub async fn get_resource(&self, id: i64) -> Result<CloudResource, DomainError> {
        tracing::debug!("Getting cloud resource by id");

        self.repo
            .get(&*self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::CloudResource, id))
    }

    #[instrument(skip(self, new), fields(cloud_type = %new.cloud_type))]
    pub async fn create_resource(
        &self,
        new: NewCloudResource,
    ) -> Result<CloudResource, DomainError> {
        tracing::info!("Creating new cloud resource");

        let NewCloudResource { cloud_type, name } = new;
        let name = normalize_name("name", &name, self.config.max_name_length)?;
        let created = self
            .repo
            .create(&*self.db, NewCloudResource::new(cloud_type, name))
            .await?;

        tracing::info!("Successfully created cloud resource with id={}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, update), fields(resource_id = id))]
    pub async fn update_resource(
        &self,
        id: i64,
        update: CloudResourceUpdate,
    ) -> Result<CloudResource, DomainError> {
        tracing::info!("Updating cloud resource");

        let CloudResourceUpdate { cloud_type, name } = update;
        let name = normalize_name("name", &name, self.config.max_name_length)?;
        let conn = &*self.db;

        self.repo
            .get(conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::CloudResource, id))?;

        let updated = self
            .repo
            .update(
                conn,
                CloudResource {
                    id,
                    cloud_type,
                    name,
                },
            )
            .await?;

        tracing::info!("Successfully updated cloud resource");
        Ok(updated)
    }

    /// Deletes a resource according to the configured [`DeletePolicy`].
    #[instrument(skip(self), fields(resource_id = id, policy = ?self.config.delete_policy))]
    pub async fn delete_resource(&self, id: i64) -> Result<(), DomainError> {
        tracing::info!("Deleting cloud resource");

        let edges = PermissionFilter {
            developer_id: None,
            resource_id: Some(id),
        };

        match self.config.delete_policy {
            DeletePolicy::Reject => {
                let conn = &*self.db;
                let dependents = self.permissions.count(conn, edges).await?;
                if dependents > 0 {
                    return Err(DomainError::has_dependents(
                        EntityKind::CloudResource,
                        id,
                        dependents,
                    ));
                }

                let deleted = match self.repo.delete(conn, id).await {
                    Err(DomainError::ReferenceViolation { .. }) => {
                        let dependents = self.permissions.count(conn, edges).await?;
                        return Err(DomainError::has_dependents(
                            EntityKind::CloudResource,
                            id,
                            dependents,
                        ));
                    }
                    other => other?,
                };
                if !deleted {
                    return Err(DomainError::not_found(EntityKind::CloudResource, id));
                }
            }
            DeletePolicy::Cascade => {
                let txn = self.db.begin().await?;
                let removed = self.permissions.delete_matching(&txn, edges).await?;
                if !self.repo.delete(&txn, id).await? {
                    txn.rollback().await?;
                    return Err(DomainError::not_found(EntityKind::CloudResource, id));
                }
                txn.commit().await?;
                tracing::debug!(removed, "Removed dependent permissions");
            }
        }

        tracing::info!("Successfully deleted cloud resource");
        Ok(())
    }
}
