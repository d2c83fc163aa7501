use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{extract::State, Json};
use db::{
    now, rider, store::InsertOutcome, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{error::json_error, validation::ValidatedJson};

/// JSON request body.
#[derive(Deserialize, Validate, JsonSchema)]
pub(super) struct RiderApplyRequest {
    #[validate(length(min = 1))]
    name: String,

    #[validate(email)]
    #[schemars(example = "crate::schema::example_email")]
    email: String,

    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_phone")]
    phone: String,

    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_region")]
    region: String,

    #[validate(length(min = 1))]
    #[schemars(example = "crate::schema::example_district")]
    district: String,
}

/// Errors that may occur during the rider application.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum RiderApplyError {
    /// Database-related error.
    DatabaseError(DbErr),
}

json_error!(RiderApplyError {});

/// Generate OAPI documentation for the [`apply`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Apply as a delivery rider.")
        .description("Applications start in the `pending` status.")
        .response::<200, Json<InsertOutcome>>()
}

/// Rider application handler.
pub(super) async fn apply(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<RiderApplyRequest>,
) -> Result<Json<InsertOutcome>, RiderApplyError> {
    let result = rider::Entity::insert(rider::ActiveModel {
        name: ActiveValue::Set(request.name),
        email: ActiveValue::Set(request.email),
        phone: ActiveValue::Set(request.phone),
        region: ActiveValue::Set(request.region),
        district: ActiveValue::Set(request.district),
        status: ActiveValue::Set(String::from(rider::PENDING)),
        created_at: ActiveValue::Set(now()),
        ..Default::default()
    })
    .exec(&*db)
    .await?;

    info!(rider_id = result.last_insert_id, "rider application received");

    Ok(Json(InsertOutcome {
        inserted_id: result.last_insert_id,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::{rider, EntityTrait};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::testing::{create_database, services, RequestBodyExt, ResponseBodyExt};

    #[tokio::test]
    async fn apply() {
        let db = Arc::new(create_database().await);

        let response = crate::app_router(db.clone(), services(Default::default()))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/riders")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "name": "Karim",
                        "email": "karim@example.com",
                        "phone": "+8801700000000",
                        "region": "Dhaka",
                        "district": "Gazipur",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_json!(response.json().await, {
            "insertedId": 1,
        });

        let model = rider::Entity::find_by_id(1)
            .one(&*db)
            .await
            .unwrap()
            .expect("rider was not created");

        assert_eq!(model.status, rider::PENDING);
    }

    #[tokio::test]
    async fn missing_fields() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), services(Default::default()))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/riders")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "name": "",
                        "email": "karim@example.com",
                        "phone": "+8801700000000",
                        "region": "Dhaka",
                        "district": "Gazipur",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
