use std::sync::Arc;

use aide::{transform::TransformOperation, OperationIo};
use axum::{
    extract::{Query, State},
    Json,
};
use db::{
    sea_query::{Expr, Func, LikeExpr},
    user, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::json_error;

/// Query string used to search users.
#[derive(Deserialize, JsonSchema)]
pub(super) struct UserListQuery {
    /// Case-insensitive part of an email or a display name.
    #[serde(default)]
    search: Option<String>,
}

/// Information about a single user.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserData {
    #[schemars(example = "crate::schema::example_database_identifier")]
    id: i64,

    #[schemars(example = "crate::schema::example_email")]
    email: String,

    #[schemars(example = "crate::schema::example_display_name")]
    display_name: Option<String>,

    photo_url: Option<String>,

    #[schemars(example = "crate::schema::example_role")]
    role: user::Role,

    /// Registration timestamp.
    #[schemars(example = "crate::schema::example_timestamp")]
    created_at: i64,
}

impl From<user::Model> for UserData {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            photo_url: model.photo_url,
            role: model.role,
            created_at: model.created_at.assume_utc().unix_timestamp(),
        }
    }
}

/// Errors that may occur during the user list request.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(super) enum UserListError {
    /// Database-related error.
    DatabaseError(DbErr),
}

json_error!(UserListError {});

/// Generate OAPI documentation for the [`list`] handler.
pub(super) fn docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get list of registered users.")
        .description("Users are sorted from the most recently registered one.")
        .response::<200, Json<Vec<UserData>>>()
}

/// List users, optionally matching a search term.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserData>>, UserListError> {
    let mut select = user::Entity::find();

    if let Some(search) = query.search.filter(|search| !search.is_empty()) {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));

        select = select.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(user::Column::Email)))
                        .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(user::Column::DisplayName)))
                        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
                ),
        );
    }

    let users = select
        .order_by_desc(user::Column::CreatedAt)
        .order_by_desc(user::Column::Id)
        .all(&*db)
        .await?
        .into_iter()
        .map(UserData::from)
        .collect();

    Ok(Json(users))
}

const LIKE_ESCAPE: char = '!';

/// Escape `LIKE` wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for ch in term.chars() {
        if matches!(ch, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }

        escaped.push(ch);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    use super::escape_like;
    use crate::testing::{create_database, create_user, services, ResponseBodyExt};

    #[test]
    fn escape_wildcards() {
        assert_eq!(escape_like("a_b%c!d"), "a!_b!%c!!d");
        assert_eq!(escape_like("karim"), "karim");
    }

    #[tokio::test]
    async fn search_wildcards_literally() {
        let db = create_database().await;

        let underscore = create_user(&db, "first_last@example.com", None).await;
        create_user(&db, "firstxlast@example.com", None).await;
        create_user(&db, "percent@example.com", Some("Full 100")).await;

        let app = crate::app_router(Arc::new(db), services(Default::default()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users?search=_")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.json().await;

        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["id"], underscore);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users?search=%25")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.json().await.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn search() {
        let db = create_database().await;

        create_user(&db, "nadia@example.com", Some("Nadia Rahman")).await;
        let karim = create_user(&db, "karim@example.com", Some("Karim Uddin")).await;
        let rider = create_user(&db, "rider@example.com", Some("Fast Karim")).await;

        let response = crate::app_router(Arc::new(db), services(Default::default()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users?search=KARIM")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.json().await;

        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["id"], rider);
        assert_eq!(body[1]["id"], karim);
        assert_eq!(body[1]["displayName"], "Karim Uddin");
        assert_eq!(body[1]["role"], "user");
    }

    #[tokio::test]
    async fn without_search() {
        let db = create_database().await;

        create_user(&db, "nadia@example.com", None).await;
        create_user(&db, "karim@example.com", None).await;

        let response = crate::app_router(Arc::new(db), services(Default::default()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.json().await.as_array().map(Vec::len), Some(2));
    }
}
