/// Rider application route.
mod apply;

/// Rider deletion route.
mod delete;

/// Rider list route.
mod list;

/// Rider application review route.
mod status;

use std::sync::Arc;

use aide::axum::{routing::get_with, ApiRouter};
use db::{rider, DatabaseConnection};
use schemars::JsonSchema;
use serde::Serialize;

/// Information about a single rider application.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RiderData {
    #[schemars(example = "crate::schema::example_database_identifier")]
    pub id: i64,

    pub name: String,

    #[schemars(example = "crate::schema::example_email")]
    pub email: String,

    #[schemars(example = "crate::schema::example_phone")]
    pub phone: String,

    #[schemars(example = "crate::schema::example_region")]
    pub region: String,

    #[schemars(example = "crate::schema::example_district")]
    pub district: String,

    /// Review status, `pending` until the application is reviewed.
    #[schemars(example = "crate::schema::example_rider_status")]
    pub status: String,

    /// Application timestamp.
    #[schemars(example = "crate::schema::example_timestamp")]
    pub created_at: i64,
}

impl From<rider::Model> for RiderData {
    fn from(model: rider::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            region: model.region,
            district: model.district,
            status: model.status,
            created_at: model.created_at.assume_utc().unix_timestamp(),
        }
    }
}

/// Create an [`ApiRouter`] that provides an API server with rider application routes.
pub(crate) fn routes() -> ApiRouter<Arc<DatabaseConnection>> {
    ApiRouter::new()
        .api_route(
            "/riders",
            get_with(list::list, list::docs).post_with(apply::apply, apply::docs),
        )
        .api_route(
            "/riders/:id",
            get_with(list::details, list::details_docs)
                .patch_with(status::status, status::docs)
                .delete_with(delete::delete, delete::docs),
        )
        .with_path_items(|op| op.tag("Riders"))
}
