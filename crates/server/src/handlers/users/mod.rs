/// User list route.
mod list;

/// User registration route.
mod register;

/// User role lookup and update routes.
mod role;

use std::sync::Arc;

use aide::axum::{
    routing::{get_with, patch_with},
    ApiRouter,
};
use db::DatabaseConnection;

/// Create an [`ApiRouter`] that provides an API server with user management routes.
pub(crate) fn routes() -> ApiRouter<Arc<DatabaseConnection>> {
    ApiRouter::new()
        .api_route(
            "/users",
            get_with(list::list, list::docs).post_with(register::register, register::docs),
        )
        .api_route("/users/role", get_with(role::role, role::role_docs))
        .api_route(
            "/users/:id/role",
            patch_with(role::update_role, role::update_role_docs),
        )
        .with_path_items(|op| op.tag("Users"))
}
