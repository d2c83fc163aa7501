//! Parcel delivery booking.
//!
//! A parcel is created in the [`Status::Pending`] state and moves to
//! [`Status::Paid`] exactly once, when its checkout session is verified.
//! The tracking identifier is only assigned on that transition.

use schemars::JsonSchema;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Parcel model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parcels")]
pub struct Model {
    /// Unique parcel identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Human-readable parcel name.
    pub parcel_name: String,

    /// Parcel kind, e.g. `document` or `non-document`.
    pub parcel_type: String,

    /// Parcel weight in kilograms.
    pub parcel_weight: Option<f64>,

    pub sender_name: String,

    /// Email of the user that booked the delivery.
    pub sender_email: String,

    pub sender_address: String,

    pub receiver_name: String,

    pub receiver_address: String,

    /// Delivery cost in major currency units.
    pub cost: f64,

    /// Payment status.
    pub status: Status,

    /// Tracking identifier, absent until the parcel is paid.
    pub tracking_id: Option<String>,

    /// Booking timestamp.
    pub created_at: TimeDateTime,
}

/// Parcel payment status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, JsonSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Parcel model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
