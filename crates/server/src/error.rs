//! JSON error responses.
//!
//! Every handler error is rendered as `{ "error": "<message>" }` with a status
//! picked per variant. Server-side failures are logged before being returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Build an error response from a status code and a message.
pub(crate) fn error_response(status: StatusCode, message: String) -> Response {
    if status.is_server_error() {
        error!(status = status.as_u16(), "{message}");
    }

    (status, Json(json!({ "error": message }))).into_response()
}

/// Implement [`IntoResponse`] for an error type using its [`Display`] output.
///
/// Variants that are not listed map to `500 Internal Server Error`.
///
/// [`Display`]: std::fmt::Display
macro_rules! json_error {
    ($type:ty { $($pattern:pat => $status:expr),* $(,)? }) => {
        impl ::axum::response::IntoResponse for $type {
            #[allow(unreachable_patterns)]
            fn into_response(self) -> ::axum::response::Response {
                let status = match &self {
                    $($pattern => $status,)*
                    _ => ::axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                };

                $crate::error::error_response(status, self.to_string())
            }
        }
    };
}

pub(crate) use json_error;
