use access_graph_sdk::{Developer, EntityKind, ListQuery, NewDeveloper};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect, Set};

use crate::domain::error::DomainError;
use crate::domain::repos::DevelopersRepository;
use crate::infra::storage::db::{db_err, map_unique};
use crate::infra::storage::entity::developer::{ActiveModel, Column, Entity as DeveloperEntity};

/// ORM-based implementation of the `DevelopersRepository` trait.
#[derive(Clone, Default)]
pub struct OrmDevelopersRepository;

impl OrmDevelopersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DevelopersRepository for OrmDevelopersRepository {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Developer>, DomainError> {
        let found = DeveloperEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: ListQuery,
    ) -> Result<Vec<Developer>, DomainError> {
        let query = query.bounded();
        let rows = DeveloperEntity::find()
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
        new: NewDeveloper,
    ) -> Result<Developer, DomainError> {
        let email = new.email.clone();
        let m = ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            ..Default::default()
        };

        let created = m
            .insert(conn)
            .await
            .map_err(|e| map_unique(e, || DomainError::duplicate_email(email)))?;
        Ok(created.into())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        developer: Developer,
    ) -> Result<Developer, DomainError> {
        let (id, email) = (developer.id, developer.email.clone());
        let m = ActiveModel {
            id: Set(developer.id),
            name: Set(developer.name),
            email: Set(developer.email),
        };

        let updated = m.update(conn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found(EntityKind::Developer, id),
            e => map_unique(e, || DomainError::duplicate_email(email)),
        })?;
        Ok(updated.into())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<bool, DomainError> {
        let result = DeveloperEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
