use sea_orm::entity::prelude::*;

/// Stored form of `PermissionLevel`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PermissionLevelCol {
    #[sea_orm(string_value = "READ")]
    Read,
    #[sea_orm(string_value = "WRITE")]
    Write,
    #[sea_orm(string_value = "RW")]
    Rw,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub developer_id: i64,
    pub resource_id: i64,
    pub permission: PermissionLevelCol,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::developer::Entity",
        from = "Column::DeveloperId",
        to = "super::developer::Column::Id"
    )]
    Developer,
    #[sea_orm(
        belongs_to = "super::cloud_resource::Entity",
        from = "Column::ResourceId",
        to = "super::cloud_resource::Column::Id"
    )]
    CloudResource,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::developer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Developer.def()
    }
}

impl Related<super::cloud_resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CloudResource.def()
    }
}
