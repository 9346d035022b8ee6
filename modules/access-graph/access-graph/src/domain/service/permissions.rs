use std::sync::Arc;

use access_graph_sdk::{EntityKind, NewPermission, Permission, PermissionUpdate};
use sea_orm::ConnectionTrait;
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::repos::{DevelopersRepository, PermissionsRepository, ResourcesRepository};
use crate::domain::service::DbProvider;

/// Permission edges between developers and cloud resources.
///
/// # Invariant
///
/// At most one edge exists per `(developer_id, resource_id)` pair. The
/// endpoint checks below only produce precise `NotFound` errors; the pair
/// rule itself is enforced by the store's unique index, which makes
/// concurrent creates for one pair resolve to exactly one winner.
pub struct PermissionsService<
    PR: PermissionsRepository,
    DR: DevelopersRepository,
    RR: ResourcesRepository,
> {
    db: Arc<DbProvider>,
    repo: Arc<PR>,
    developers: Arc<DR>,
    resources: Arc<RR>,
}

impl<PR: PermissionsRepository, DR: DevelopersRepository, RR: ResourcesRepository>
    PermissionsService<PR, DR, RR>
{
    pub fn new(
        db: Arc<DbProvider>,
        repo: Arc<PR>,
        developers: Arc<DR>,
        resources: Arc<RR>,
    ) -> Self {
        Self {
            db,
            repo,
            developers,
            resources,
        }
    }

    #[instrument(skip(self), fields(permission_id = id))]
    pub async fn get_permission(&self, id: i64) -> Result<Permission, DomainError> {
        tracing::debug!("Getting permission by id");

        self.repo
            .get(&*self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Permission, id))
    }

    /// Links a developer to a resource.
    #[instrument(
        skip(self),
        fields(
            developer_id = new.developer_id,
            resource_id = new.resource_id,
            level = %new.permission
        )
    )]
    pub async fn create_permission(&self, new: NewPermission) -> Result<Permission, DomainError> {
        tracing::info!("Creating new permission");

        let conn = &*self.db;
        self.ensure_developer(conn, new.developer_id).await?;
        self.ensure_resource(conn, new.resource_id).await?;

        let created = match self.repo.create(conn, new).await {
            Err(e @ DomainError::ReferenceViolation { .. }) => {
                return Err(self
                    .resolve_reference(conn, new.developer_id, new.resource_id, e)
                    .await);
            }
            other => other?,
        };

        tracing::info!("Successfully created permission with id={}", created.id);
        Ok(created)
    }

    /// Replaces level and endpoints of an edge. Only endpoints that change
    /// are re-validated; the pair rule is checked against the new pair.
    #[instrument(skip(self, update), fields(permission_id = id, level = %update.permission))]
    pub async fn update_permission(
        &self,
        id: i64,
        update: PermissionUpdate,
    ) -> Result<Permission, DomainError> {
        tracing::info!("Updating permission");

        let conn = &*self.db;
        let current = self
            .repo
            .get(conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Permission, id))?;

        if update.developer_id != current.developer_id {
            self.ensure_developer(conn, update.developer_id).await?;
        }
        if update.resource_id != current.resource_id {
            self.ensure_resource(conn, update.resource_id).await?;
        }

        let target = Permission {
            id,
            developer_id: update.developer_id,
            resource_id: update.resource_id,
            permission: update.permission,
        };
        let updated = match self.repo.update(conn, target).await {
            Err(e @ DomainError::ReferenceViolation { .. }) => {
                return Err(self
                    .resolve_reference(conn, update.developer_id, update.resource_id, e)
                    .await);
            }
            other => other?,
        };

        tracing::info!("Successfully updated permission");
        Ok(updated)
    }

    #[instrument(skip(self), fields(permission_id = id))]
    pub async fn delete_permission(&self, id: i64) -> Result<(), DomainError> {
        tracing::info!("Deleting permission");

        let deleted = self.repo.delete(&*self.db, id).await?;
        if !deleted {
            return Err(DomainError::not_found(EntityKind::Permission, id));
        }

        tracing::info!("Successfully deleted permission");
        Ok(())
    }

    async fn ensure_developer<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        match self.developers.get(conn, id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(EntityKind::Developer, id)),
        }
    }

    async fn ensure_resource<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        match self.resources.get(conn, id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(EntityKind::CloudResource, id)),
        }
    }

    /// An endpoint vanished between validation and the write. Names the
    /// missing endpoint, or keeps `original` if both are present again.
    async fn resolve_reference<C: ConnectionTrait>(
        &self,
        conn: &C,
        developer_id: i64,
        resource_id: i64,
        original: DomainError,
    ) -> DomainError {
        tracing::debug!(error = %original, "Permission endpoint disappeared during write");

        if let Err(e) = self.ensure_developer(conn, developer_id).await {
            return e;
        }
        if let Err(e) = self.ensure_resource(conn, resource_id).await {
            return e;
        }
        original
    }
}
