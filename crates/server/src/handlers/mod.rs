use schemars::JsonSchema;
use serde::Serialize;

/// API documentation routes.
pub(crate) mod docs;

/// Parcel booking routes.
pub(crate) mod parcels;

/// Checkout and payment history routes.
pub(crate) mod payments;

/// Delivery rider application routes.
pub(crate) mod riders;

/// User profile and role routes.
pub(crate) mod users;

/// Result of a record deletion.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteOutcome {
    /// Count of deleted records.
    pub deleted_count: u64,
}
