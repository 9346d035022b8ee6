use std::sync::Arc;

use access_graph_sdk::{
    CloudFootprint, CloudResource, CloudType, Developer, DeveloperResources,
    DeveloperWithPermissions, HighPrivilegeReview, NewCloudResource, NewPermission, Permission,
    PermissionWithDeveloper, PermissionWithResource, ResourceWithPermissions, WriteAccessAudit,
};
use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use http::StatusCode;
use tracing::info;

use crate::api::rest::dto::{
    CloudTypeParams, CreateDeveloperReq, CreatePermissionReq, CreateResourceReq, DeletedResp,
    HighPrivilegeParams, PageLimits, PageParams, PermissionListParams, ResourceListParams,
    UpdateDeveloperReq, UpdatePermissionReq, UpdateResourceReq, WriteAuditParams,
};
use crate::api::rest::error::ApiResult;
use crate::domain::error::DomainError;
use crate::module::ConcreteAppServices;

type Svc = Extension<Arc<ConcreteAppServices>>;

// ==================== Developer Handlers ====================

#[tracing::instrument(skip(svc, req), fields(developer.email = %req.email))]
pub(crate) async fn create_developer(
    Extension(svc): Svc,
    Json(req): Json<CreateDeveloperReq>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating developer");
    let developer = svc.developers.create_developer(req.into()).await?;
    Ok((StatusCode::CREATED, Json(developer)))
}

#[tracing::instrument(skip(svc, limits))]
pub(crate) async fn list_developers(
    Extension(svc): Svc,
    Extension(limits): Extension<PageLimits>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Vec<Developer>>> {
    let query = limits.window(params.skip, params.limit);
    Ok(Json(svc.queries.list_developers(query).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn get_developer(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<Developer>> {
    Ok(Json(svc.developers.get_developer(id).await?))
}

#[tracing::instrument(skip(svc, req))]
pub(crate) async fn update_developer(
    Extension(svc): Svc,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDeveloperReq>,
) -> ApiResult<Json<Developer>> {
    Ok(Json(svc.developers.update_developer(id, req.into()).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn delete_developer(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeletedResp>> {
    svc.developers.delete_developer(id).await?;
    Ok(Json(DeletedResp::OK))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn developer_detailed(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeveloperWithPermissions>> {
    Ok(Json(svc.queries.developer_detailed(id).await?))
}

#[tracing::instrument(skip(svc, params))]
pub(crate) async fn resources_for_developer(
    Extension(svc): Svc,
    Path(id): Path<i64>,
    Query(params): Query<CloudTypeParams>,
) -> ApiResult<Json<DeveloperResources>> {
    let cloud_type = params.cloud_type()?;
    Ok(Json(
        svc.queries.resources_for_developer(id, cloud_type).await?,
    ))
}

// ==================== Cloud Resource Handlers ====================

#[tracing::instrument(skip(svc, req), fields(resource.cloud_type = %req.cloud_type))]
pub(crate) async fn create_resource(
    Extension(svc): Svc,
    Json(req): Json<CreateResourceReq>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating cloud resource");
    let new = NewCloudResource::try_from(req)?;
    let resource = svc.resources.create_resource(new).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

#[tracing::instrument(skip(svc, limits, params))]
pub(crate) async fn list_resources(
    Extension(svc): Svc,
    Extension(limits): Extension<PageLimits>,
    Query(params): Query<ResourceListParams>,
) -> ApiResult<Json<Vec<CloudResource>>> {
    let cloud_type = params.cloud_type()?;
    let query = limits.window(params.skip, params.limit);
    Ok(Json(svc.queries.list_resources(cloud_type, query).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn get_resource(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<CloudResource>> {
    Ok(Json(svc.resources.get_resource(id).await?))
}

#[tracing::instrument(skip(svc, req))]
pub(crate) async fn update_resource(
    Extension(svc): Svc,
    Path(id): Path<i64>,
    Json(req): Json<UpdateResourceReq>,
) -> ApiResult<Json<CloudResource>> {
    let update = NewCloudResource::try_from(req)?;
    Ok(Json(svc.resources.update_resource(id, update).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn delete_resource(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeletedResp>> {
    svc.resources.delete_resource(id).await?;
    Ok(Json(DeletedResp::OK))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn resource_detailed(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<ResourceWithPermissions>> {
    Ok(Json(svc.queries.resource_detailed(id).await?))
}

// ==================== Permission Handlers ====================

#[tracing::instrument(
    skip(svc, req),
    fields(developer_id = req.developer_id, resource_id = req.resource_id)
)]
pub(crate) async fn create_permission(
    Extension(svc): Svc,
    Json(req): Json<CreatePermissionReq>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating permission");
    let new = NewPermission::try_from(req)?;
    let permission = svc.permissions.create_permission(new).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

#[tracing::instrument(skip(svc, limits, params))]
pub(crate) async fn list_permissions(
    Extension(svc): Svc,
    Extension(limits): Extension<PageLimits>,
    Query(params): Query<PermissionListParams>,
) -> ApiResult<Json<Vec<Permission>>> {
    let query = limits.window(params.skip, params.limit);
    Ok(Json(
        svc.queries.list_permissions(params.filter(), query).await?,
    ))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn permissions_by_developer(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<PermissionWithResource>>> {
    Ok(Json(svc.queries.permissions_for_developer(id).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn permissions_by_resource(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<PermissionWithDeveloper>>> {
    Ok(Json(svc.queries.permissions_for_resource(id).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn get_permission(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<Permission>> {
    Ok(Json(svc.permissions.get_permission(id).await?))
}

#[tracing::instrument(skip(svc, req))]
pub(crate) async fn update_permission(
    Extension(svc): Svc,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePermissionReq>,
) -> ApiResult<Json<Permission>> {
    let update = NewPermission::try_from(req)?;
    Ok(Json(svc.permissions.update_permission(id, update).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn delete_permission(
    Extension(svc): Svc,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeletedResp>> {
    svc.permissions.delete_permission(id).await?;
    Ok(Json(DeletedResp::OK))
}

// ==================== Report Handlers ====================

#[tracing::instrument(skip(svc, params))]
pub(crate) async fn write_access_report(
    Extension(svc): Svc,
    Query(params): Query<WriteAuditParams>,
) -> ApiResult<Json<WriteAccessAudit>> {
    let cloud_type = params.cloud_type()?;
    Ok(Json(
        svc.analytics
            .write_access_audit(cloud_type, params.threshold)
            .await?,
    ))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn footprint_report(
    Extension(svc): Svc,
    Path(cloud_type): Path<String>,
) -> ApiResult<Json<CloudFootprint>> {
    let cloud_type: CloudType = cloud_type.parse().map_err(DomainError::from)?;
    Ok(Json(svc.analytics.cloud_footprint(cloud_type).await?))
}

#[tracing::instrument(skip(svc))]
pub(crate) async fn high_privilege_report(
    Extension(svc): Svc,
    Query(params): Query<HighPrivilegeParams>,
) -> ApiResult<Json<HighPrivilegeReview>> {
    Ok(Json(
        svc.analytics
            .high_privilege_review(params.minimum_resources)
            .await?,
    ))
}
