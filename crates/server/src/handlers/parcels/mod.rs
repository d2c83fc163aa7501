/// Parcel booking route.
mod create;

/// Parcel deletion route.
mod delete;

/// Parcel details route.
mod details;

/// Parcel list route.
mod list;

use std::sync::Arc;

use aide::axum::{routing::get_with, ApiRouter};
use db::{parcel, DatabaseConnection};
use schemars::JsonSchema;
use serde::Serialize;

/// Information about a single parcel.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParcelData {
    /// Parcel identifier.
    #[schemars(example = "crate::schema::example_database_identifier")]
    pub id: i64,

    /// Parcel name.
    #[schemars(example = "crate::schema::example_parcel_name")]
    pub parcel_name: String,

    /// Parcel kind.
    #[schemars(example = "crate::schema::example_parcel_type")]
    pub parcel_type: String,

    /// Parcel weight in kilograms.
    #[schemars(example = "crate::schema::example_parcel_weight")]
    pub parcel_weight: Option<f64>,

    pub sender_name: String,

    /// Email of the user that booked the delivery.
    #[schemars(example = "crate::schema::example_email")]
    pub sender_email: String,

    #[schemars(example = "crate::schema::example_address")]
    pub sender_address: String,

    pub receiver_name: String,

    #[schemars(example = "crate::schema::example_address")]
    pub receiver_address: String,

    /// Delivery cost in major currency units.
    #[schemars(example = "crate::schema::example_cost")]
    pub cost: f64,

    /// Payment status.
    #[schemars(example = "crate::schema::example_parcel_status")]
    pub status: parcel::Status,

    /// Tracking identifier, assigned once the parcel is paid.
    #[schemars(example = "crate::schema::example_tracking_id")]
    pub tracking_id: Option<String>,

    /// Booking timestamp.
    #[schemars(example = "crate::schema::example_timestamp")]
    pub created_at: i64,
}

impl From<parcel::Model> for ParcelData {
    fn from(model: parcel::Model) -> Self {
        Self {
            id: model.id,
            parcel_name: model.parcel_name,
            parcel_type: model.parcel_type,
            parcel_weight: model.parcel_weight,
            sender_name: model.sender_name,
            sender_email: model.sender_email,
            sender_address: model.sender_address,
            receiver_name: model.receiver_name,
            receiver_address: model.receiver_address,
            cost: model.cost,
            status: model.status,
            tracking_id: model.tracking_id,
            created_at: model.created_at.assume_utc().unix_timestamp(),
        }
    }
}

/// Create an [`ApiRouter`] that provides an API server with parcel booking routes.
pub(crate) fn routes() -> ApiRouter<Arc<DatabaseConnection>> {
    ApiRouter::new()
        .api_route(
            "/parcel",
            get_with(list::list, list::docs).post_with(create::create, create::docs),
        )
        .api_route(
            "/parcel/:id",
            get_with(details::details, details::docs).delete_with(delete::delete, delete::docs),
        )
        .with_path_items(|op| op.tag("Parcels"))
}
