//! Entity <-> SDK model conversions.

use access_graph_sdk::{CloudResource, CloudType, Developer, Permission, PermissionLevel};

use super::entity::cloud_resource::{self, CloudTypeCol};
use super::entity::developer;
use super::entity::permission::{self, PermissionLevelCol};

impl From<CloudTypeCol> for CloudType {
    fn from(col: CloudTypeCol) -> Self {
        match col {
            CloudTypeCol::Aws => Self::Aws,
            CloudTypeCol::Azure => Self::Azure,
            CloudTypeCol::Gcp => Self::Gcp,
        }
    }
}

impl From<CloudType> for CloudTypeCol {
    fn from(ct: CloudType) -> Self {
        match ct {
            CloudType::Aws => Self::Aws,
            CloudType::Azure => Self::Azure,
            CloudType::Gcp => Self::Gcp,
        }
    }
}

impl From<PermissionLevelCol> for PermissionLevel {
    fn from(col: PermissionLevelCol) -> Self {
        match col {
            PermissionLevelCol::Read => Self::Read,
            PermissionLevelCol::Write => Self::Write,
            PermissionLevelCol::Rw => Self::Rw,
        }
    }
}

impl From<PermissionLevel> for PermissionLevelCol {
    fn from(level: PermissionLevel) -> Self {
        match level {
            PermissionLevel::Read => Self::Read,
            PermissionLevel::Write => Self::Write,
            PermissionLevel::Rw => Self::Rw,
        }
    }
}

impl From<developer::Model> for Developer {
    fn from(m: developer::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
        }
    }
}

impl From<cloud_resource::Model> for CloudResource {
    fn from(m: cloud_resource::Model) -> Self {
        Self {
            id: m.id,
            cloud_type: m.cloud_type.into(),
            name: m.name,
        }
    }
}

impl From<permission::Model> for Permission {
    fn from(m: permission::Model) -> Self {
        Self {
            id: m.id,
            developer_id: m.developer_id,
            resource_id: m.resource_id,
            permission: m.permission.into(),
        }
    }
}
