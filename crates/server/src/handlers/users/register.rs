use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{extract::State, Json};
use db::{
    now, store::InsertOutcome, user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QuerySelect, SelectExt,
};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{error::json_error, validation::ValidatedJson};

/// JSON request body.
#[derive(Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterRequest {
    /// Email used with the identity provider.
    #[validate(email)]
    #[schemars(example = "crate::schema::example_email")]
    email: String,

    #[serde(default)]
    #[schemars(example = "crate::schema::example_display_name")]
    display_name: Option<String>,

    #[serde(default)]
    #[validate(url)]
    photo_url: Option<String>,
}

/// JSON response body.
#[derive(Serialize, JsonSchema)]
#[serde(untagged)]
pub(super) enum RegisterResponse {
    /// User with the same email is already registered.
    Exists {
        /// Explanation message.
        message: String,
    },

    /// User was registered.
    Created(InsertOutcome),
}

/// Errors that may occur during the user registration.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum RegisterError {
    /// Database-related error.
    DatabaseError(DbErr),
}

json_error!(RegisterError {});

/// Generate OAPI documentation for the [`register`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Register a user.")
        .description(
            r#"New users receive the `user` role. Registering an already known email
is not an error, the existing record is kept as is."#,
        )
        .response::<200, Json<RegisterResponse>>()
}

/// User registration handler.
pub(super) async fn register(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, RegisterError> {
    let exists = user::Entity::find()
        .select_only()
        .filter(user::Column::Email.eq(request.email.as_str()))
        .exists(&*db)
        .await?;

    if exists {
        return Ok(Json(RegisterResponse::Exists {
            message: String::from("user exists"),
        }));
    }

    let result = user::Entity::insert(user::ActiveModel {
        email: ActiveValue::Set(request.email),
        display_name: ActiveValue::Set(request.display_name),
        photo_url: ActiveValue::Set(request.photo_url),
        role: ActiveValue::Set(user::Role::User),
        created_at: ActiveValue::Set(now()),
        ..Default::default()
    })
    .exec(&*db)
    .await?;

    info!(user_id = result.last_insert_id, "user registered");

    Ok(Json(RegisterResponse::Created(InsertOutcome {
        inserted_id: result.last_insert_id,
    })))
}
