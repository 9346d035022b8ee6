//! Repository ports implemented by `infra::storage`.
//!
//! Repositories translate store constraint violations into domain errors
//! because only they know which constraint a write can trip.

use access_graph_sdk::{
    CloudResource, CloudType, Developer, ListQuery, NewCloudResource, NewDeveloper,
    NewPermission, Permission, PermissionFilter, PermissionWithDeveloper, PermissionWithResource,
};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::error::DomainError;

#[async_trait]
pub trait DevelopersRepository: Send + Sync {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Developer>, DomainError>;

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: ListQuery,
    ) -> Result<Vec<Developer>, DomainError>;

    /// Fails with `DuplicateEmail` when the email is taken.
    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewDeveloper,
    ) -> Result<Developer, DomainError>;

    /// Fails with `DuplicateEmail` when the email is taken by another row.
    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        developer: Developer,
    ) -> Result<Developer, DomainError>;

    /// Returns `false` if no row matched. Fails with `ReferenceViolation`
    /// when permissions still point at the row.
    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait ResourcesRepository: Send + Sync {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<CloudResource>, DomainError>;

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        cloud_type: Option<CloudType>,
        query: ListQuery,
    ) -> Result<Vec<CloudResource>, DomainError>;

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewCloudResource,
    ) -> Result<CloudResource, DomainError>;

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        resource: CloudResource,
    ) -> Result<CloudResource, DomainError>;

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait PermissionsRepository: Send + Sync {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Permission>, DomainError>;

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: PermissionFilter,
        query: ListQuery,
    ) -> Result<Vec<Permission>, DomainError>;

    /// Edges of one developer joined with their resources, ascending edge id.
    async fn list_with_resources<C: ConnectionTrait>(
        &self,
        conn: &C,
        developer_id: i64,
    ) -> Result<Vec<PermissionWithResource>, DomainError>;

    /// Edges on one resource joined with their developers, ascending edge id.
    async fn list_with_developers<C: ConnectionTrait>(
        &self,
        conn: &C,
        resource_id: i64,
    ) -> Result<Vec<PermissionWithDeveloper>, DomainError>;

    async fn count<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: PermissionFilter,
    ) -> Result<u64, DomainError>;

    /// Inserts the edge. The store's unique `(developer_id, resource_id)`
    /// index turns a second edge for the same pair into `DuplicateEdge`.
    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewPermission,
    ) -> Result<Permission, DomainError>;

    /// Rewrites level and endpoints. A pair already held by another edge
    /// yields `DuplicateEdge`.
    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        permission: Permission,
    ) -> Result<Permission, DomainError>;

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<bool, DomainError>;

    /// Deletes every edge matching the filter, returning how many went away.
    async fn delete_matching<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: PermissionFilter,
    ) -> Result<u64, DomainError>;
}
