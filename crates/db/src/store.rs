//! Store capabilities consumed by the payment verification flow.
//!
//! The flow only needs a couple of narrow operations on parcels and payments,
//! so these are expressed as traits and implemented for [`DatabaseConnection`].
//! Handlers pass the shared connection in; tests may substitute their own stores.

use async_trait::async_trait;
use schemars::JsonSchema;
use sea_orm::{
    ActiveEnum, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::{parcel, payment};

/// Result of a parcel status update.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    /// Count of parcels that were modified.
    pub modified_count: u64,
}

/// Result of a payment record insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Identifier of the inserted payment record.
    pub inserted_id: i64,
}

/// Payment record to be stored.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPayment {
    pub amount: f64,
    pub currency: String,
    pub customer_email: String,
    pub parcel_id: i64,
    pub parcel_name: String,
    pub transaction_id: String,
    pub payment_status: String,
    pub tracking_id: String,
    pub paid_at: PrimitiveDateTime,
}

impl From<NewPayment> for payment::ActiveModel {
    fn from(value: NewPayment) -> Self {
        payment::ActiveModel {
            amount: ActiveValue::Set(value.amount),
            currency: ActiveValue::Set(value.currency),
            customer_email: ActiveValue::Set(value.customer_email),
            parcel_id: ActiveValue::Set(value.parcel_id),
            parcel_name: ActiveValue::Set(value.parcel_name),
            transaction_id: ActiveValue::Set(value.transaction_id),
            payment_status: ActiveValue::Set(value.payment_status),
            tracking_id: ActiveValue::Set(value.tracking_id),
            paid_at: ActiveValue::Set(value.paid_at),
            ..Default::default()
        }
    }
}

/// Parcel operations used by payment verification.
#[async_trait]
pub trait ParcelStore: Send + Sync {
    /// Find a parcel by its identifier.
    async fn find_parcel(&self, id: i64) -> Result<Option<parcel::Model>, DbErr>;

    /// Mark a pending parcel as paid and attach its tracking identifier.
    ///
    /// Parcels that are already paid are left untouched and reported
    /// with a zero modified count.
    async fn mark_paid(&self, id: i64, tracking_id: &str) -> Result<UpdateOutcome, DbErr>;
}

/// Payment operations used by payment verification.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a new payment record.
    async fn insert_payment(&self, payment: NewPayment) -> Result<InsertOutcome, DbErr>;
}

#[async_trait]
impl ParcelStore for DatabaseConnection {
    async fn find_parcel(&self, id: i64) -> Result<Option<parcel::Model>, DbErr> {
        parcel::Entity::find_by_id(id).one(self).await
    }

    async fn mark_paid(&self, id: i64, tracking_id: &str) -> Result<UpdateOutcome, DbErr> {
        let result = parcel::Entity::update_many()
            .set(parcel::ActiveModel {
                status: ActiveValue::Set(parcel::Status::Paid),
                tracking_id: ActiveValue::Set(Some(tracking_id.to_owned())),
                ..Default::default()
            })
            .filter(parcel::Column::Id.eq(id))
            .filter(parcel::Column::Status.eq(parcel::Status::Pending.into_value()))
            .exec(self)
            .await?;

        Ok(UpdateOutcome {
            modified_count: result.rows_affected,
        })
    }
}

#[async_trait]
impl PaymentStore for DatabaseConnection {
    async fn insert_payment(&self, payment: NewPayment) -> Result<InsertOutcome, DbErr> {
        let result = payment::Entity::insert(payment::ActiveModel::from(payment))
            .exec(self)
            .await?;

        Ok(InsertOutcome {
            inserted_id: result.last_insert_id,
        })
    }
}
