use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use db::{
    store::UpdateOutcome, user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect,
};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::{error::json_error, schema::example_error, validation::ValidatedJson};

/// Query string with the email to look up.
#[derive(Deserialize, JsonSchema)]
pub(super) struct RoleQuery {
    #[schemars(example = "crate::schema::example_email")]
    email: String,
}

/// JSON response body of the role lookup.
#[derive(Serialize, JsonSchema)]
pub(super) struct RoleResponse {
    /// Role of the user, `user` for unknown emails.
    #[schemars(example = "crate::schema::example_role")]
    role: user::Role,
}

/// JSON request body of the role update.
#[derive(Deserialize, Validate, JsonSchema)]
pub(super) struct RoleUpdateRequest {
    /// New user role.
    #[schemars(example = "crate::schema::example_role")]
    role: user::Role,
}

/// Errors that may occur during user role requests.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum RoleError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Requested user was not found.
    #[display(fmt = "user not found")]
    UserNotFound,
}

json_error!(RoleError {
    RoleError::UserNotFound => StatusCode::NOT_FOUND,
});

/// Generate OAPI documentation for the [`role`] handler.
pub(super) fn role_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get role of a user.")
        .response::<200, Json<RoleResponse>>()
}

/// Role lookup handler.
pub(super) async fn role(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<RoleResponse>, RoleError> {
    let role = user::Entity::find()
        .select_only()
        .column(user::Column::Role)
        .filter(user::Column::Email.eq(query.email))
        .into_tuple::<user::Role>()
        .one(&*db)
        .await?
        .unwrap_or(user::Role::User);

    Ok(Json(RoleResponse { role }))
}

/// Generate OAPI documentation for the [`update_role`] handler.
pub(super) fn update_role_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Change role of a user.")
        .response::<200, Json<UpdateOutcome>>()
        .response_with::<404, Json<Value>, _>(|op| {
            op.description("User not found.")
                .example(example_error(RoleError::UserNotFound))
        })
}

/// Role update handler.
pub(super) async fn update_role(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<RoleUpdateRequest>,
) -> Result<Json<UpdateOutcome>, RoleError> {
    let result = user::Entity::update_many()
        .set(user::ActiveModel {
            role: ActiveValue::Set(request.role.clone()),
            ..Default::default()
        })
        .filter(user::Column::Id.eq(id))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(RoleError::UserNotFound);
    }

    info!(user_id = id, role = ?request.role, "user role changed");

    Ok(Json(UpdateOutcome {
        modified_count: result.rows_affected,
    }))
}
