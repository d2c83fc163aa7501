use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Path, State},
    Json,
};
use db::{rider, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use crate::{error::json_error, handlers::DeleteOutcome};

/// Errors that may occur during the rider application deletion.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum RiderDeleteError {
    /// Database-related error.
    DatabaseError(DbErr),
}

json_error!(RiderDeleteError {});

/// Generate OAPI documentation for the [`delete`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete a rider application.")
        .response::<200, Json<DeleteOutcome>>()
}

/// Rider application deletion handler.
pub(super) async fn delete(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<DeleteOutcome>, RiderDeleteError> {
    let result = rider::Entity::delete_by_id(id).exec(&*db).await?;

    Ok(Json(DeleteOutcome {
        deleted_count: result.rows_affected,
    }))
}
