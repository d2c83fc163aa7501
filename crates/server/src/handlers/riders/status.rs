use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{
    rider, store::UpdateOutcome, user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::{error::json_error, schema::example_error, validation::ValidatedJson};

/// JSON request body.
#[derive(Deserialize, Validate, JsonSchema)]
pub(super) struct RiderStatusRequest {
    /// New review status.
    ///
    /// Approving an application grants the `rider` role
    /// to the user registered with the same email.
    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_rider_status")]
    status: String,
}

/// Errors that may occur during the rider application review.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum RiderStatusError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Requested rider application was not found.
    #[display(fmt = "rider not found")]
    RiderNotFound,
}

json_error!(RiderStatusError {
    RiderStatusError::RiderNotFound => StatusCode::NOT_FOUND,
});

/// Generate OAPI documentation for the [`status`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Review a rider application.")
        .response::<200, Json<UpdateOutcome>>()
        .response_with::<404, Json<Value>, _>(|op| {
            op.description("Rider application not found.")
                .example(example_error(RiderStatusError::RiderNotFound))
        })
}

/// Rider application review handler.
pub(super) async fn status(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<RiderStatusRequest>,
) -> Result<Json<UpdateOutcome>, RiderStatusError> {
    db.transaction::<_, _, RiderStatusError>(|txn| {
        Box::pin(async move {
            let email = rider::Entity::find_by_id(id)
                .one(txn)
                .await?
                .map(|model| model.email)
                .ok_or(RiderStatusError::RiderNotFound)?;

            let result = rider::Entity::update_many()
                .set(rider::ActiveModel {
                    status: ActiveValue::Set(request.status.clone()),
                    ..Default::default()
                })
                .filter(rider::Column::Id.eq(id))
                .exec(txn)
                .await?;

            if request.status == rider::APPROVED {
                let granted = user::Entity::update_many()
                    .set(user::ActiveModel {
                        role: ActiveValue::Set(user::Role::Rider),
                        ..Default::default()
                    })
                    .filter(user::Column::Email.eq(email.as_str()))
                    .exec(txn)
                    .await?;

                info!(
                    rider_id = id,
                    email = %email,
                    users = granted.rows_affected,
                    "rider approved"
                );
            }

            Ok(Json(UpdateOutcome {
                modified_count: result.rows_affected,
            }))
        })
    })
    .await
    .into_raw_result()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::{rider, user, DatabaseConnection, EntityTrait};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::testing::{
        create_database, create_rider, create_user, services, RequestBodyExt, ResponseBodyExt,
    };

    fn status_request(id: i64, status: &str) -> Request<Body> {
        Request::builder()
            .method("PATCH")
            .uri(format!("/riders/{id}"))
            .header("Content-Type", "application/json")
            .body(Body::from_json(json!({ "status": status })))
            .unwrap()
    }

    async fn user_role(db: &DatabaseConnection, id: i64) -> user::Role {
        user::Entity::find_by_id(id)
            .one(db)
            .await
            .unwrap()
            .expect("user does not exist")
            .role
    }

    #[tokio::test]
    async fn approve() {
        let db = Arc::new(create_database().await);

        let user_id = create_user(&db, "karim@example.com", None).await;
        let rider_id = create_rider(&db, "karim@example.com", "pending").await;

        let response = crate::app_router(db.clone(), services(Default::default()))
            .oneshot(status_request(rider_id, "approved"))
            .await
            .unwrap();

        assert_json!(response.json().await, {
            "modifiedCount": 1,
        });

        let model = rider::Entity::find_by_id(rider_id)
            .one(&*db)
            .await
            .unwrap()
            .expect("rider does not exist");

        assert_eq!(model.status, rider::APPROVED);
        assert_eq!(user_role(&db, user_id).await, user::Role::Rider);
    }

    #[tokio::test]
    async fn reject() {
        let db = Arc::new(create_database().await);

        let user_id = create_user(&db, "karim@example.com", None).await;
        let rider_id = create_rider(&db, "karim@example.com", "pending").await;

        let response = crate::app_router(db.clone(), services(Default::default()))
            .oneshot(status_request(rider_id, "rejected"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(user_role(&db, user_id).await, user::Role::User);
    }

    #[tokio::test]
    async fn unknown_rider() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), services(Default::default()))
            .oneshot(status_request(42, "approved"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_json!(response.json().await, {
            "error": "rider not found",
        });
    }
}
