use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{store::ParcelStore, DatabaseConnection, DbErr};
use derive_more::{Display, Error, From};
use serde_json::Value;

use super::ParcelData;
use crate::{error::json_error, schema::example_error};

/// Errors that may occur during the parcel details request.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum ParcelDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Requested parcel was not found.
    #[display(fmt = "parcel not found")]
    ParcelNotFound,
}

json_error!(ParcelDetailsError {
    ParcelDetailsError::ParcelNotFound => StatusCode::NOT_FOUND,
});

/// Generate OAPI documentation for the [`details`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get parcel details.")
        .response::<200, Json<ParcelData>>()
        .response_with::<404, Json<Value>, _>(|op| {
            op.description("Parcel not found.")
                .example(example_error(ParcelDetailsError::ParcelNotFound))
        })
}

/// Parcel details request handler.
pub(super) async fn details(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<ParcelData>, ParcelDetailsError> {
    db.find_parcel(id)
        .await?
        .map(|model| Json(model.into()))
        .ok_or(ParcelDetailsError::ParcelNotFound)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::testing::{create_database, create_parcel, services, ResponseBodyExt};

    #[tokio::test]
    async fn existing() {
        let db = create_database().await;

        let id = create_parcel(&db, "sender@example.com", 150.0).await;

        let response = crate::app_router(Arc::new(db), services(Default::default()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/parcel/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.json().await;

        assert_eq!(body["id"], id);
        assert_eq!(body["parcelName"], "Books");
        assert_eq!(body["receiverAddress"], "Chattogram");
        assert_eq!(body["status"], "pending");
        assert!(body["createdAt"].is_i64());
    }

    #[tokio::test]
    async fn missing() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), services(Default::default()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/parcel/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_json!(response.json().await, {
            "error": "parcel not found",
        });
    }
}
