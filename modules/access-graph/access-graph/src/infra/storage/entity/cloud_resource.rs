use sea_orm::entity::prelude::*;

/// Stored form of `CloudType`: the upper-case provider name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CloudTypeCol {
    #[sea_orm(string_value = "AWS")]
    Aws,
    #[sea_orm(string_value = "AZURE")]
    Azure,
    #[sea_orm(string_value = "GCP")]
    Gcp,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cloud_resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub cloud_type: CloudTypeCol,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::permission::Entity")]
    Permission,
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
