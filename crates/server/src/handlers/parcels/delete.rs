use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Path, State},
    Json,
};
use db::{parcel, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use crate::{error::json_error, handlers::DeleteOutcome};

/// Errors that may occur during the parcel deletion.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum ParcelDeleteError {
    /// Database-related error.
    DatabaseError(DbErr),
}

json_error!(ParcelDeleteError {});

/// Generate OAPI documentation for the [`delete`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete a parcel booking.")
        .description("Deleting an unknown parcel is not an error, the deleted count is zero instead.")
        .response::<200, Json<DeleteOutcome>>()
}

/// Parcel deletion handler.
pub(super) async fn delete(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<DeleteOutcome>, ParcelDeleteError> {
    let result = parcel::Entity::delete_by_id(id).exec(&*db).await?;

    Ok(Json(DeleteOutcome {
        deleted_count: result.rows_affected,
    }))
}
