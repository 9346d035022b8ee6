use access_graph_sdk::{CloudResource, CloudType, EntityKind, ListQuery, NewCloudResource};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::error::DomainError;
use crate::domain::repos::ResourcesRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::cloud_resource::{
    ActiveModel, CloudTypeCol, Column, Entity as ResourceEntity,
};

/// ORM-based implementation of the `ResourcesRepository` trait.
#[derive(Clone, Default)]
pub struct OrmResourcesRepository;

impl OrmResourcesRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourcesRepository for OrmResourcesRepository {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<CloudResource>, DomainError> {
        let found = ResourceEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        cloud_type: Option<CloudType>,
        query: ListQuery,
    ) -> Result<Vec<CloudResource>, DomainError> {
        let query = query.bounded();
        let mut select = ResourceEntity::find();
        if let Some(ct) = cloud_type {
            select = select.filter(Column::CloudType.eq(CloudTypeCol::from(ct)));
        }

        let rows = select
            .order_by_asc(Column::Id)
            .offset(query.skip)
            .limit(query.limit)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewCloudResource,
    ) -> Result<CloudResource, DomainError> {
        let m = ActiveModel {
            cloud_type: Set(new.cloud_type.into()),
            name: Set(new.name),
            ..Default::default()
        };

        let created = m.insert(conn).await.map_err(db_err)?;
        Ok(created.into())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        resource: CloudResource,
    ) -> Result<CloudResource, DomainError> {
        let id = resource.id;
        let m = ActiveModel {
            id: Set(resource.id),
            cloud_type: Set(resource.cloud_type.into()),
            name: Set(resource.name),
        };

        let updated = m.update(conn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found(EntityKind::CloudResource, id),
            e => db_err(e),
        })?;
        Ok(updated.into())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<bool, DomainError> {
        let result = ResourceEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
