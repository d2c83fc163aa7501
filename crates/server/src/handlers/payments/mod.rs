/// Checkout session creation route.
mod checkout;

/// Payment history route.
mod history;

/// Checkout session verification route.
mod verify;

use std::sync::Arc;

use aide::axum::{
    routing::{get_with, patch_with, post_with},
    ApiRouter,
};
use db::DatabaseConnection;

/// Create an [`ApiRouter`] that provides an API server with checkout routes.
pub(crate) fn routes() -> ApiRouter<Arc<DatabaseConnection>> {
    ApiRouter::new()
        .api_route(
            "/create-checkout-session",
            post_with(checkout::checkout, checkout::docs),
        )
        .api_route(
            "/verify-success-payment",
            patch_with(verify::verify, verify::docs),
        )
        .with_path_items(|op| op.tag("Payments"))
}

/// Create an [`ApiRouter`] with payment routes that require a verified identity.
pub(crate) fn protected_routes() -> ApiRouter<Arc<DatabaseConnection>> {
    ApiRouter::new()
        .api_route("/payments", get_with(history::history, history::docs))
        .with_path_items(|op| op.tag("Payments"))
}
