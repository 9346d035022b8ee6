//! Request and query-string DTOs.
//!
//! Enumerations arrive as free text so that an unknown value surfaces as an
//! `InvalidEnumeration` problem instead of a generic body rejection.
//! Responses reuse the SDK models, which already carry the wire format.

use access_graph_sdk::{
    CloudType, ListQuery, NewCloudResource, NewDeveloper, NewPermission, PermissionFilter,
    PermissionLevel,
};
use serde::{Deserialize, Serialize};

use crate::config::AccessGraphConfig;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeveloperReq {
    pub name: String,
    pub email: String,
}

/// Full replacement, same shape as creation.
pub type UpdateDeveloperReq = CreateDeveloperReq;

impl From<CreateDeveloperReq> for NewDeveloper {
    fn from(req: CreateDeveloperReq) -> Self {
        NewDeveloper::new(req.name, req.email)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResourceReq {
    pub cloud_type: String,
    pub name: String,
}

pub type UpdateResourceReq = CreateResourceReq;

impl TryFrom<CreateResourceReq> for NewCloudResource {
    type Error = DomainError;

    fn try_from(req: CreateResourceReq) -> Result<Self, Self::Error> {
        Ok(NewCloudResource::new(req.cloud_type.parse()?, req.name))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePermissionReq {
    pub developer_id: i64,
    pub resource_id: i64,
    pub permission: String,
}

pub type UpdatePermissionReq = CreatePermissionReq;

impl TryFrom<CreatePermissionReq> for NewPermission {
    type Error = DomainError;

    fn try_from(req: CreatePermissionReq) -> Result<Self, Self::Error> {
        let level: PermissionLevel = req.permission.parse()?;
        Ok(NewPermission::new(req.developer_id, req.resource_id, level))
    }
}

/// Page window bounds from module configuration.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default: u64,
    pub max: u64,
}

impl From<&AccessGraphConfig> for PageLimits {
    fn from(cfg: &AccessGraphConfig) -> Self {
        Self {
            default: cfg.default_page_size,
            max: cfg.max_page_size,
        }
    }
}

impl PageLimits {
    /// Missing `limit` falls back to the default; larger ones are clamped.
    /// `skip` is capped at what the store can bind.
    #[must_use]
    pub fn window(self, skip: Option<u64>, limit: Option<u64>) -> ListQuery {
        ListQuery::page(skip.unwrap_or(0), limit.unwrap_or(self.default).min(self.max)).bounded()
    }
}

fn parse_cloud_type(raw: Option<&str>) -> Result<Option<CloudType>, DomainError> {
    raw.map(str::parse::<CloudType>)
        .transpose()
        .map_err(DomainError::from)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceListParams {
    pub cloud_type: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl ResourceListParams {
    pub fn cloud_type(&self) -> Result<Option<CloudType>, DomainError> {
        parse_cloud_type(self.cloud_type.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionListParams {
    pub developer_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl PermissionListParams {
    #[must_use]
    pub fn filter(&self) -> PermissionFilter {
        PermissionFilter {
            developer_id: self.developer_id,
            resource_id: self.resource_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudTypeParams {
    pub cloud_type: Option<String>,
}

impl CloudTypeParams {
    pub fn cloud_type(&self) -> Result<Option<CloudType>, DomainError> {
        parse_cloud_type(self.cloud_type.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WriteAuditParams {
    pub cloud_type: Option<String>,
    pub threshold: Option<usize>,
}

impl WriteAuditParams {
    pub fn cloud_type(&self) -> Result<Option<CloudType>, DomainError> {
        parse_cloud_type(self.cloud_type.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighPrivilegeParams {
    pub minimum_resources: Option<usize>,
}

/// Body of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResp {
    pub ok: bool,
}

impl DeletedResp {
    pub const OK: Self = Self { ok: true };
}
