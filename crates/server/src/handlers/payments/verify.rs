use std::sync::Arc;

use aide::transform::TransformOperation;
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use common::checkout::CheckoutProvider;
use db::{
    store::{InsertOutcome, UpdateOutcome},
    DatabaseConnection,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    schema::example_error,
    verification::{verify_payment, Verification, VerificationError},
};

/// Query string with the checkout session to verify.
#[derive(Deserialize, JsonSchema)]
pub(super) struct VerifyQuery {
    /// Checkout session identifier returned to the success page.
    #[serde(default)]
    #[schemars(example = "crate::schema::example_session_id")]
    session_id: Option<String>,
}

/// JSON response body.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct VerifyPaymentResponse {
    /// Whether the checkout session was paid.
    success: bool,

    /// Parcel status update result.
    #[serde(skip_serializing_if = "Option::is_none")]
    modify_parcel: Option<UpdateOutcome>,

    /// Payment intent reference of the checkout session.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(example = "crate::schema::example_transaction_id")]
    transaction_id: Option<String>,

    /// Stored payment record.
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_info: Option<InsertOutcome>,

    /// Tracking identifier assigned to the parcel.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(example = "crate::schema::example_tracking_id")]
    tracking_id: Option<String>,
}

impl From<Verification> for VerifyPaymentResponse {
    fn from(verification: Verification) -> Self {
        match verification {
            Verification::Unpaid => Self {
                success: false,
                modify_parcel: None,
                transaction_id: None,
                payment_info: None,
                tracking_id: None,
            },
            Verification::Paid {
                modify_parcel,
                transaction_id,
                payment_info,
                tracking_id,
            } => Self {
                success: true,
                modify_parcel: Some(modify_parcel),
                transaction_id: Some(transaction_id),
                payment_info,
                tracking_id: Some(tracking_id),
            },
        }
    }
}

/// Generate OAPI documentation for the [`verify`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Verify a checkout session.")
        .description(
            r#"Paid sessions mark their parcel as paid, assign a tracking identifier
and store a payment record. Unpaid sessions are reported with `success: false`
and leave every record untouched."#,
        )
        .response::<200, Json<VerifyPaymentResponse>>()
        .response_with::<400, Json<Value>, _>(|op| {
            op.description("Session identifier is missing.")
                .example(example_error(VerificationError::MissingParameter))
        })
}

/// Checkout session verification handler.
pub(super) async fn verify(
    Extension(checkout): Extension<Arc<dyn CheckoutProvider>>,
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<VerifyPaymentResponse>, VerificationError> {
    verify_payment(&*checkout, &*db, &*db, query.session_id.as_deref())
        .await
        .map(|verification| Json(verification.into()))
}
