use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{extract::State, Json};
use db::{
    now, parcel, store::InsertOutcome, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{error::json_error, validation::ValidatedJson};

/// JSON request body.
#[derive(Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct ParcelCreateRequest {
    /// Parcel name.
    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_parcel_name")]
    parcel_name: String,

    /// Parcel kind.
    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_parcel_type")]
    parcel_type: String,

    /// Parcel weight in kilograms.
    #[serde(default)]
    #[validate(range(min = 0.0))]
    #[schemars(example = "crate::schema::example_parcel_weight")]
    parcel_weight: Option<f64>,

    #[validate(length(min = 1))]
    sender_name: String,

    /// Email of the user booking the delivery.
    #[validate(email)]
    #[schemars(example = "crate::schema::example_email")]
    sender_email: String,

    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_address")]
    sender_address: String,

    #[validate(length(min = 1))]
    receiver_name: String,

    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_address")]
    receiver_address: String,

    /// Delivery cost in major currency units.
    #[validate(range(min = 0.0))]
    #[schemars(example = "crate::schema::example_cost")]
    cost: f64,
}

/// Errors that may occur during the parcel booking.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum ParcelCreateError {
    /// Database-related error.
    DatabaseError(DbErr),
}

json_error!(ParcelCreateError {});

/// Generate OAPI documentation for the [`create`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Book a parcel delivery.")
        .description("New parcels start unpaid and receive a tracking identifier once paid.")
        .response::<200, Json<InsertOutcome>>()
}

/// Parcel booking handler.
pub(super) async fn create(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ParcelCreateRequest>,
) -> Result<Json<InsertOutcome>, ParcelCreateError> {
    let result = parcel::Entity::insert(parcel::ActiveModel {
        parcel_name: ActiveValue::Set(request.parcel_name),
        parcel_type: ActiveValue::Set(request.parcel_type),
        parcel_weight: ActiveValue::Set(request.parcel_weight),
        sender_name: ActiveValue::Set(request.sender_name),
        sender_email: ActiveValue::Set(request.sender_email),
        sender_address: ActiveValue::Set(request.sender_address),
        receiver_name: ActiveValue::Set(request.receiver_name),
        receiver_address: ActiveValue::Set(request.receiver_address),
        cost: ActiveValue::Set(request.cost),
        status: ActiveValue::Set(parcel::Status::Pending),
        tracking_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now()),
        ..Default::default()
    })
    .exec(&*db)
    .await?;

    info!(parcel_id = result.last_insert_id, "parcel booked");

    Ok(Json(InsertOutcome {
        inserted_id: result.last_insert_id,
    }))
}
