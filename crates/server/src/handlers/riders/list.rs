use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use db::{rider, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::RiderData;
use crate::{error::json_error, schema::example_error};

/// Query string used to filter rider applications.
#[derive(Deserialize, JsonSchema)]
pub(super) struct RiderListQuery {
    /// Review status to filter by.
    #[serde(default)]
    #[schemars(example = "crate::schema::example_rider_status")]
    status: Option<String>,
}

/// Errors that may occur during rider application requests.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum RiderListError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Requested rider application was not found.
    #[display(fmt = "rider not found")]
    RiderNotFound,
}

json_error!(RiderListError {
    RiderListError::RiderNotFound => StatusCode::NOT_FOUND,
});

/// Generate OAPI documentation for the [`list`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get list of rider applications.")
        .description("Applications are sorted from the most recent one.")
        .response::<200, Json<Vec<RiderData>>>()
}

/// List rider applications, optionally filtered by their status.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<RiderListQuery>,
) -> Result<Json<Vec<RiderData>>, RiderListError> {
    let mut select = rider::Entity::find();

    if let Some(status) = query.status {
        select = select.filter(rider::Column::Status.eq(status));
    }

    let riders = select
        .order_by_desc(rider::Column::CreatedAt)
        .order_by_desc(rider::Column::Id)
        .all(&*db)
        .await?
        .into_iter()
        .map(RiderData::from)
        .collect();

    Ok(Json(riders))
}

/// Generate OAPI documentation for the [`details`] handler.
pub(super) fn details_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get rider application details.")
        .response::<200, Json<RiderData>>()
        .response_with::<404, Json<Value>, _>(|op| {
            op.description("Rider application not found.")
                .example(example_error(RiderListError::RiderNotFound))
        })
}

/// Rider application details handler.
pub(super) async fn details(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<RiderData>, RiderListError> {
    rider::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .map(|model| Json(model.into()))
        .ok_or(RiderListError::RiderNotFound)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::testing::{create_database, create_rider, services, ResponseBodyExt};

    #[tokio::test]
    async fn filter_by_status() {
        let db = create_database().await;

        create_rider(&db, "first@example.com", "pending").await;
        let approved = create_rider(&db, "second@example.com", "approved").await;
        let pending = create_rider(&db, "third@example.com", "pending").await;

        let app = crate::app_router(Arc::new(db), services(Default::default()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/riders?status=pending")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.json().await;

        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["id"], pending);
        assert_eq!(body[0]["status"], "pending");

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/riders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.json().await;

        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(body[1]["id"], approved);
    }

    #[tokio::test]
    async fn details() {
        let db = create_database().await;

        let id = create_rider(&db, "rider@example.com", "pending").await;

        let app = crate::app_router(Arc::new(db), services(Default::default()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/riders/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.json().await;

        assert_eq!(body["email"], "rider@example.com");
        assert_eq!(body["district"], "Gazipur");

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/riders/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
