use std::sync::Arc;

use aide::{
    axum::{routing::get, ApiRouter},
    openapi::OpenApi,
    redoc::Redoc,
};
use axum::{Extension, Json};
use db::DatabaseConnection;

/// Create an [`ApiRouter`] that serves the Redoc page and the generated OpenAPI document.
pub(crate) fn routes() -> ApiRouter<Arc<DatabaseConnection>> {
    ApiRouter::new()
        .route("/docs", Redoc::new("/docs/api.json").axum_route())
        .route(
            "/docs/api.json",
            get(|Extension(oapi): Extension<Arc<OpenApi>>| async move { Json(oapi) }),
        )
}
