use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(ColumnDef::new(Payments::Currency).string().not_null())
                    .col(ColumnDef::new(Payments::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Payments::ParcelId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::ParcelName).string().not_null())
                    .col(ColumnDef::new(Payments::TransactionId).string().not_null())
                    .col(ColumnDef::new(Payments::PaymentStatus).string().not_null())
                    .col(ColumnDef::new(Payments::TrackingId).string().not_null())
                    .col(
                        ColumnDef::new(Payments::PaidAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::ParcelId)
                            .to(crate::Parcels::Table, crate::Parcels::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_customer_email")
                    .table(Payments::Table)
                    .col(Payments::CustomerEmail)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub(crate) enum Payments {
    Table,
    Id,
    Amount,
    Currency,
    CustomerEmail,
    ParcelId,
    ParcelName,
    TransactionId,
    PaymentStatus,
    TrackingId,
    PaidAt,
}
