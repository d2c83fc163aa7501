//! Confirmed parcel payment.
//!
//! Payment records are written by the checkout verification flow only. There
//! is no uniqueness constraint on the transaction reference, so verifying the
//! same checkout session twice stores two records.

use sea_orm::entity::prelude::*;

/// Payment model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Paid amount in major currency units.
    pub amount: f64,

    pub currency: String,

    pub customer_email: String,

    /// Paid parcel identifier.
    pub parcel_id: i64,

    pub parcel_name: String,

    /// Provider payment reference.
    pub transaction_id: String,

    /// Payment status as reported by the provider.
    pub payment_status: String,

    /// Tracking identifier assigned to the parcel.
    pub tracking_id: String,

    pub paid_at: TimeDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parcel::Entity",
        from = "Column::ParcelId",
        to = "super::parcel::Column::Id"
    )]
    Parcel,
}

impl Related<super::parcel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parcel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
