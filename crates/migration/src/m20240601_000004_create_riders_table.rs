use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Riders::Table)
                    .col(
                        ColumnDef::new(Riders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Riders::Name).string().not_null())
                    .col(ColumnDef::new(Riders::Email).string().not_null())
                    .col(ColumnDef::new(Riders::Phone).string().not_null())
                    .col(ColumnDef::new(Riders::Region).string().not_null())
                    .col(ColumnDef::new(Riders::District).string().not_null())
                    .col(
                        ColumnDef::new(Riders::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Riders::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Riders::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub(crate) enum Riders {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Region,
    District,
    Status,
    CreatedAt,
}
