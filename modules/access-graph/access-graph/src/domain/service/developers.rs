use std::sync::Arc;

use access_graph_sdk::{Developer, DeveloperUpdate, EntityKind, NewDeveloper, PermissionFilter};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::config::DeletePolicy;
use crate::domain::error::DomainError;
use crate::domain::repos::{DevelopersRepository, PermissionsRepository};
use crate::domain::service::validation::{normalize_email, normalize_name};
use crate::domain::service::{DbProvider, ServiceConfig};

/// Developers service.
///
/// Email uniqueness is decided by the store's unique index, never by a
/// prior lookup, so two concurrent creates with one email cannot both win.
pub struct DevelopersService<R: DevelopersRepository, PR: PermissionsRepository> {
    db: Arc<DbProvider>,
    repo: Arc<R>,
    permissions: Arc<PR>,
    config: ServiceConfig,
}

impl<R: DevelopersRepository, PR: PermissionsRepository> DevelopersService<R, PR> {
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

    #[instrument(skip(self), fields(developer_id = id))]
    pub async fn get_developer(&self, id: i64) -> Result<Developer, DomainError> {
        tracing::debug!("Getting developer by id");

        self.repo
            .get(&*self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Developer, id))
    }

    #[instrument(skip(self, new), fields(email = %new.email))]
    pub async fn create_developer(&self, new: NewDeveloper) -> Result<Developer, DomainError> {
        tracing::info!("Creating new developer");

        let new = self.normalize(new)?;
        let created = self.repo.create(&*self.db, new).await?;

        tracing::info!("Successfully created developer with id={}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, update), fields(developer_id = id))]
    pub async fn update_developer(
        &self,
        id: i64,
        update: DeveloperUpdate,
    ) -> Result<Developer, DomainError> {
        tracing::info!("Updating developer");

        let NewDeveloper { name, email } = self.normalize(update)?;
        let conn = &*self.db;

        self.repo
            .get(conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Developer, id))?;

        let updated = self
            .repo
            .update(conn, Developer { id, name, email })
            .await?;

        tracing::info!("Successfully updated developer");
        Ok(updated)
    }

    /// Deletes a developer according to the configured [`DeletePolicy`].
    #[instrument(skip(self), fields(developer_id = id, policy = ?self.config.delete_policy))]
    pub async fn delete_developer(&self, id: i64) -> Result<(), DomainError> {
        tracing::info!("Deleting developer");

        let edges = PermissionFilter {
            developer_id: Some(id),
            resource_id: None,
        };

        match self.config.delete_policy {
            DeletePolicy::Reject => {
                let conn = &*self.db;
                let dependents = self.permissions.count(conn, edges).await?;
                if dependents > 0 {
                    return Err(DomainError::has_dependents(
                        EntityKind::Developer,
                        id,
                        dependents,
                    ));
                }

                let deleted = match self.repo.delete(conn, id).await {
                    // An edge was linked after the count; the foreign key refused.
                    Err(DomainError::ReferenceViolation { .. }) => {
                        let dependents = self.permissions.count(conn, edges).await?;
                        return Err(DomainError::has_dependents(
                            EntityKind::Developer,
                            id,
                            dependents,
                        ));
                    }
                    other => other?,
                };
                if !deleted {
                    return Err(DomainError::not_found(EntityKind::Developer, id));
                }
            }
            DeletePolicy::Cascade => {
                let txn = self.db.begin().await?;
                let removed = self.permissions.delete_matching(&txn, edges).await?;
                if !self.repo.delete(&txn, id).await? {
                    txn.rollback().await?;
                    return Err(DomainError::not_found(EntityKind::Developer, id));
                }
                txn.commit().await?;
                tracing::debug!(removed, "Removed dependent permissions");
            }
        }

        tracing::info!("Successfully deleted developer");
        Ok(())
    }

    fn normalize(&self, new: NewDeveloper) -> Result<NewDeveloper, DomainError> {
        let NewDeveloper { name, email } = new;
        Ok(NewDeveloper {
            name: normalize_name("name", &name, self.config.max_name_length)?,
            email: normalize_email(&email)?,
        })
    }
}
