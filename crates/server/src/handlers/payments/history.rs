use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use db::{payment, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{auth::CurrentIdentity, error::json_error, schema::example_error};

/// Query string used to filter payments.
#[derive(Deserialize, JsonSchema)]
pub(super) struct PaymentHistoryQuery {
    /// Customer email to filter by.
    #[serde(default)]
    #[schemars(example = "crate::schema::example_email")]
    email: Option<String>,
}

/// Information about a single payment.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentData {
    #[schemars(example = "crate::schema::example_database_identifier")]
    id: i64,

    /// Paid amount in major currency units.
    #[schemars(example = "crate::schema::example_amount")]
    amount: f64,

    #[schemars(example = "crate::schema::example_currency")]
    currency: String,

    #[schemars(example = "crate::schema::example_email")]
    customer_email: String,

    #[schemars(example = "crate::schema::example_database_identifier")]
    parcel_id: i64,

    #[schemars(example = "crate::schema::example_parcel_name")]
    parcel_name: String,

    /// Payment intent reference.
    #[schemars(example = "crate::schema::example_transaction_id")]
    transaction_id: String,

    payment_status: String,

    #[schemars(example = "crate::schema::example_tracking_id")]
    tracking_id: String,

    /// Payment confirmation timestamp.
    #[schemars(example = "crate::schema::example_timestamp")]
    paid_at: i64,
}

impl From<payment::Model> for PaymentData {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            currency: model.currency,
            customer_email: model.customer_email,
            parcel_id: model.parcel_id,
            parcel_name: model.parcel_name,
            transaction_id: model.transaction_id,
            payment_status: model.payment_status,
            tracking_id: model.tracking_id,
            paid_at: model.paid_at.assume_utc().unix_timestamp(),
        }
    }
}

/// Errors that may occur during the payment history request.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum PaymentHistoryError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Requested email does not belong to the verified identity.
    #[display(fmt = "forbidden access")]
    Forbidden,
}

json_error!(PaymentHistoryError {
    PaymentHistoryError::Forbidden => StatusCode::FORBIDDEN,
});

/// Generate OAPI documentation for the [`history`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get payment history.")
        .description("Payments are sorted from the most recent one.")
        .response::<200, Json<Vec<PaymentData>>>()
        .response_with::<403, Json<Value>, _>(|op| {
            op.description("Email does not belong to the current user.")
                .example(example_error(PaymentHistoryError::Forbidden))
        })
}

/// Payment history request handler.
pub(super) async fn history(
    identity: CurrentIdentity,
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<PaymentHistoryQuery>,
) -> Result<Json<Vec<PaymentData>>, PaymentHistoryError> {
    let mut select = payment::Entity::find();

    if let Some(email) = query.email {
        if !identity.permits(&email) {
            return Err(PaymentHistoryError::Forbidden);
        }

        select = select.filter(payment::Column::CustomerEmail.eq(email));
    }

    let payments = select
        .order_by_desc(payment::Column::PaidAt)
        .order_by_desc(payment::Column::Id)
        .stream(&*db)
        .await?
        .map_ok(PaymentData::from)
        .try_collect()
        .await?;

    Ok(Json(payments))
}
