//! Graph records and request types shared by every consumer of the module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EnumParseError;

/// Cloud provider a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudType {
    Aws,
    Azure,
    Gcp,
}

impl CloudType {
    pub const ALL: [Self; 3] = [Self::Aws, Self::Azure, Self::Gcp];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "AZURE",
            Self::Gcp => "GCP",
        }
    }
}

impl fmt::Display for CloudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is case-insensitive: `"aws"`, `"Aws"` and `"AWS"` are all accepted.
impl FromStr for CloudType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EnumParseError::new("cloud_type", s))
    }
}

/// Privilege carried by a permission edge. `Rw` grants both read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionLevel {
    Read,
    Write,
    Rw,
}

impl PermissionLevel {
    pub const ALL: [Self; 3] = [Self::Read, Self::Write, Self::Rw];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Rw => "RW",
        }
    }

    #[must_use]
    pub fn allows_read(self) -> bool {
        matches!(self, Self::Read | Self::Rw)
    }

    #[must_use]
    pub fn allows_write(self) -> bool {
        matches!(self, Self::Write | Self::Rw)
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EnumParseError::new("permission", s))
    }
}

/// Kind of record an identifier refers to. Used in `NotFound` style errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Developer,
    CloudResource,
    Permission,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Developer => "Developer",
            Self::CloudResource => "CloudResource",
            Self::Permission => "Permission",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeveloper {
    pub name: String,
    pub email: String,
}

impl NewDeveloper {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Full replacement of a developer's mutable fields.
pub type DeveloperUpdate = NewDeveloper;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudResource {
    pub id: i64,
    pub cloud_type: CloudType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCloudResource {
    pub cloud_type: CloudType,
    pub name: String,
}

impl NewCloudResource {
    pub fn new(cloud_type: CloudType, name: impl Into<String>) -> Self {
        Self {
            cloud_type,
            name: name.into(),
        }
    }
}

/// Full replacement of a resource's mutable fields.
pub type CloudResourceUpdate = NewCloudResource;

/// Edge granting one developer one privilege level on one resource.
///
/// At most one edge exists per `(developer_id, resource_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub developer_id: i64,
    pub resource_id: i64,
    pub permission: PermissionLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPermission {
    pub developer_id: i64,
    pub resource_id: i64,
    pub permission: PermissionLevel,
}

impl NewPermission {
    #[must_use]
    pub fn new(developer_id: i64, resource_id: i64, permission: PermissionLevel) -> Self {
        Self {
            developer_id,
            resource_id,
            permission,
        }
    }
}

/// Full replacement of an edge: level and both endpoints.
///
/// Changing an endpoint retargets the edge; the uniqueness rule is checked
/// against the new pair.
pub type PermissionUpdate = NewPermission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionWithResource {
    #[serde(flatten)]
    pub permission: Permission,
    pub cloud_resource: CloudResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionWithDeveloper {
    #[serde(flatten)]
    pub permission: Permission,
    pub developer: Developer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperWithPermissions {
    #[serde(flatten)]
    pub developer: Developer,
    pub permissions: Vec<PermissionWithResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceWithPermissions {
    #[serde(flatten)]
    pub resource: CloudResource,
    pub permissions: Vec<PermissionWithDeveloper>,
}

/// Resources reachable by one developer, optionally narrowed to a cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperResources {
    pub developer: Developer,
    pub cloud_type: Option<CloudType>,
    pub resources: Vec<PermissionWithResource>,
    pub total_resources: usize,
}

/// Offset/limit window for list operations. `limit: None` returns every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl ListQuery {
    /// Largest offset or limit a store binds: both are signed 64-bit there.
    pub const MAX_BOUND: u64 = i64::MAX.unsigned_abs();

    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }

    /// Same window with `skip` and `limit` capped at [`Self::MAX_BOUND`].
    /// A capped offset lies past any real row, so it still yields an empty page.
    #[must_use]
    pub fn bounded(self) -> Self {
        Self {
            skip: self.skip.min(Self::MAX_BOUND),
            limit: self.limit.map(|limit| limit.min(Self::MAX_BOUND)),
        }
    }
}

/// Independent optional filters, combined with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFilter {
    pub developer_id: Option<i64>,
    pub resource_id: Option<i64>,
}
