use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Query, State},
    Json,
};
use db::{parcel, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;
use schemars::JsonSchema;
use serde::Deserialize;

use super::ParcelData;
use crate::error::json_error;

/// Query string used to filter parcels.
#[derive(Deserialize, JsonSchema)]
pub(super) struct ParcelListQuery {
    /// Sender email to filter by.
    #[serde(default)]
    #[schemars(example = "crate::schema::example_email")]
    email: Option<String>,
}

/// Errors that may occur during the parcel list request.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum ParcelListError {
    /// Database-related error.
    DatabaseError(DbErr),
}

json_error!(ParcelListError {});

/// Generate OAPI documentation for the [`list`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get list of booked parcels.")
        .description("Parcels are sorted from the newest to the oldest booking.")
        .response::<200, Json<Vec<ParcelData>>>()
}

/// List parcels, optionally filtered by the sender email.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<ParcelListQuery>,
) -> Result<Json<Vec<ParcelData>>, ParcelListError> {
    let mut select = parcel::Entity::find();

    if let Some(email) = query.email {
        select = select.filter(parcel::Column::SenderEmail.eq(email));
    }

    let parcels = select
        .order_by_desc(parcel::Column::CreatedAt)
        .order_by_desc(parcel::Column::Id)
        .stream(&*db)
        .await?
        .map_ok(ParcelData::from)
        .try_collect()
        .await?;

    Ok(Json(parcels))
}
