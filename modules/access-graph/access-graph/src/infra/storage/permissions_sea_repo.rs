use access_graph_sdk::{
    EntityKind, ListQuery, NewPermission, Permission, PermissionFilter, PermissionWithDeveloper,
    PermissionWithResource,
};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::error::DomainError;
use crate::domain::repos::PermissionsRepository;
use crate::infra::storage::db::{db_err, map_unique};
use crate::infra::storage::entity::cloud_resource::Entity as ResourceEntity;
use crate::infra::storage::entity::developer::Entity as DeveloperEntity;
use crate::infra::storage::entity::permission::{
    ActiveModel, Column, Entity as PermissionEntity,
};

/// ORM-based implementation of the `PermissionsRepository` trait.
///
/// The one-edge-per-pair rule is never checked with a prior read: the insert
/// or update is attempted and the unique index on
/// `(developer_id, resource_id)` decides.
#[derive(Clone, Default)]
pub struct OrmPermissionsRepository;

impl OrmPermissionsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn filter_condition(filter: PermissionFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(developer_id) = filter.developer_id {
        cond = cond.add(Column::DeveloperId.eq(developer_id));
    }
    if let Some(resource_id) = filter.resource_id {
        cond = cond.add(Column::ResourceId.eq(resource_id));
    }
    cond
}

#[async_trait]
impl PermissionsRepository for OrmPermissionsRepository {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Permission>, DomainError> {
        let found = PermissionEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: PermissionFilter,
        query: ListQuery,
    ) -> Result<Vec<Permission>, DomainError> {
        let query = query.bounded();
        let rows = PermissionEntity::find()
            .filter(filter_condition(filter))
            .order_by_asc(Column::Id)
            .offset(query.skip)
            .limit(query.limit)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_with_resources<C: ConnectionTrait>(
        &self,
        conn: &C,
        developer_id: i64,
    ) -> Result<Vec<PermissionWithResource>, DomainError> {
        let rows = PermissionEntity::find()
            .filter(Column::DeveloperId.eq(developer_id))
            .find_also_related(ResourceEntity)
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(perm, resource)| {
                resource.map(|r| PermissionWithResource {
                    permission: perm.into(),
                    cloud_resource: r.into(),
                })
            })
            .collect())
    }

    async fn list_with_developers<C: ConnectionTrait>(
        &self,
        conn: &C,
        resource_id: i64,
    ) -> Result<Vec<PermissionWithDeveloper>, DomainError> {
        let rows = PermissionEntity::find()
            .filter(Column::ResourceId.eq(resource_id))
            .find_also_related(DeveloperEntity)
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(perm, developer)| {
                developer.map(|d| PermissionWithDeveloper {
                    permission: perm.into(),
                    developer: d.into(),
                })
            })
            .collect())
    }

    async fn count<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: PermissionFilter,
    ) -> Result<u64, DomainError> {
        PermissionEntity::find()
            .filter(filter_condition(filter))
            .count(conn)
            .await
            .map_err(db_err)
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewPermission,
    ) -> Result<Permission, DomainError> {
        let m = ActiveModel {
            developer_id: Set(new.developer_id),
            resource_id: Set(new.resource_id),
            permission: Set(new.permission.into()),
            ..Default::default()
        };

        let created = m.insert(conn).await.map_err(|e| {
            map_unique(e, || {
                DomainError::duplicate_edge(new.developer_id, new.resource_id)
            })
        })?;
        Ok(created.into())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        permission: Permission,
    ) -> Result<Permission, DomainError> {
        let Permission {
            id,
            developer_id,
            resource_id,
            permission: level,
        } = permission;
        let m = ActiveModel {
            id: Set(id),
            developer_id: Set(developer_id),
            resource_id: Set(resource_id),
            permission: Set(level.into()),
        };

        let updated = m.update(conn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found(EntityKind::Permission, id),
            e => map_unique(e, || DomainError::duplicate_edge(developer_id, resource_id)),
        })?;
        Ok(updated.into())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<bool, DomainError> {
        let result = PermissionEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_matching<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: PermissionFilter,
    ) -> Result<u64, DomainError> {
        let result = PermissionEntity::delete_many()
            .filter(filter_condition(filter))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
