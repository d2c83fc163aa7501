use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parcels::Table)
                    .col(
                        ColumnDef::new(Parcels::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parcels::ParcelName).string().not_null())
                    .col(ColumnDef::new(Parcels::ParcelType).string().not_null())
                    .col(ColumnDef::new(Parcels::ParcelWeight).double())
                    .col(ColumnDef::new(Parcels::SenderName).string().not_null())
                    .col(ColumnDef::new(Parcels::SenderEmail).string().not_null())
                    .col(ColumnDef::new(Parcels::SenderAddress).string().not_null())
                    .col(ColumnDef::new(Parcels::ReceiverName).string().not_null())
                    .col(ColumnDef::new(Parcels::ReceiverAddress).string().not_null())
                    .col(ColumnDef::new(Parcels::Cost).double().not_null())
                    .col(
                        ColumnDef::new(Parcels::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Parcels::TrackingId).string())
                    .col(
                        ColumnDef::new(Parcels::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parcels_sender_email")
                    .table(Parcels::Table)
                    .col(Parcels::SenderEmail)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Parcels::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub(crate) enum Parcels {
    Table,
    Id,
    ParcelName,
    ParcelType,
    ParcelWeight,
    SenderName,
    SenderEmail,
    SenderAddress,
    ReceiverName,
    ReceiverAddress,
    Cost,
    Status,
    TrackingId,
    CreatedAt,
}
