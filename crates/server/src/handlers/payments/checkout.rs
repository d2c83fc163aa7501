use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{extract::State, http::StatusCode, Extension, Json};
use common::checkout::{CheckoutError, CheckoutProvider, NewCheckoutSession};
use db::{parcel, store::ParcelStore, DatabaseConnection, DbErr};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{error::json_error, schema::example_error};

/// JSON request body.
#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct CheckoutRequest {
    /// Identifier of the parcel to pay for.
    #[schemars(example = "crate::schema::example_database_identifier")]
    parcel_id: i64,
}

/// JSON response body.
#[derive(Serialize, JsonSchema)]
pub(super) struct CheckoutResponse {
    /// Hosted checkout page to redirect the customer to.
    #[schemars(example = "crate::schema::example_checkout_url")]
    url: String,
}

/// Errors that may occur during the checkout session creation.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum CreateCheckoutError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Checkout provider call failed.
    UpstreamError(CheckoutError),

    /// Requested parcel was not found.
    #[display(fmt = "parcel not found")]
    ParcelNotFound,

    /// Parcel payment was already confirmed.
    #[display(fmt = "parcel is already paid")]
    AlreadyPaid,

    /// Provider returned a session without a checkout page.
    #[display(fmt = "checkout session has no url")]
    MissingUrl,
}

json_error!(CreateCheckoutError {
    CreateCheckoutError::ParcelNotFound => StatusCode::NOT_FOUND,
    CreateCheckoutError::AlreadyPaid => StatusCode::CONFLICT,
});

/// Generate OAPI documentation for the [`checkout`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create a checkout session for a parcel.")
        .description(
            r#"The parcel cost is charged in minor currency units. After a successful
payment, the customer is redirected back to the dashboard with the session
identifier, which should then be passed to the verification route."#,
        )
        .response::<200, Json<CheckoutResponse>>()
        .response_with::<404, Json<Value>, _>(|op| {
            op.description("Parcel not found.")
                .example(example_error(CreateCheckoutError::ParcelNotFound))
        })
        .response_with::<409, Json<Value>, _>(|op| {
            op.description("Parcel is already paid.")
                .example(example_error(CreateCheckoutError::AlreadyPaid))
        })
}

/// Checkout session creation handler.
pub(super) async fn checkout(
    Extension(checkout): Extension<Arc<dyn CheckoutProvider>>,
    State(db): State<Arc<DatabaseConnection>>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, CreateCheckoutError> {
    let model = db
        .find_parcel(request.parcel_id)
        .await?
        .ok_or(CreateCheckoutError::ParcelNotFound)?;

    if model.status == parcel::Status::Paid {
        return Err(CreateCheckoutError::AlreadyPaid);
    }

    let session = checkout
        .create_session(NewCheckoutSession {
            parcel_id: model.id,
            parcel_name: model.parcel_name,
            sender_email: model.sender_email,
            cost: model.cost,
        })
        .await?;

    info!(parcel_id = model.id, session_id = %session.id, "checkout session created");

    let url = session.url.ok_or(CreateCheckoutError::MissingUrl)?;

    Ok(Json(CheckoutResponse { url }))
}
