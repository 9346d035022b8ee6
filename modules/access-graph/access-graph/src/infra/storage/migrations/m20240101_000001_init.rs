use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Developers {
    Table,
    Id,
    Name,
    Email,
}

#[derive(DeriveIden)]
enum CloudResources {
    Table,
    Id,
    CloudType,
    Name,
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Id,
    DeveloperId,
    ResourceId,
    Permission,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Developers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Developers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Developers::Name).string().not_null())
                    .col(ColumnDef::new(Developers::Email).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_developers_email")
                    .table(Developers::Table)
                    .col(Developers::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CloudResources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CloudResources::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CloudResources::CloudType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CloudResources::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Permissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Permissions::DeveloperId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Permissions::ResourceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Permissions::Permission)
                            .string_len(16)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permissions_developer")
                            .from(Permissions::Table, Permissions::DeveloperId)
                            .to(Developers::Table, Developers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permissions_resource")
                            .from(Permissions::Table, Permissions::ResourceId)
                            .to(CloudResources::Table, CloudResources::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One edge per (developer, resource) pair, enforced by the store.
        manager
            .create_index(
                Index::create()
                    .name("ux_permissions_developer_resource")
                    .table(Permissions::Table)
                    .col(Permissions::DeveloperId)
                    .col(Permissions::ResourceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_permissions_resource")
                    .table(Permissions::Table)
                    .col(Permissions::ResourceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CloudResources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Developers::Table).to_owned())
            .await
    }
}
