pub mod parcel;
pub mod payment;
pub mod rider;
pub mod store;
pub mod user;

use std::error::Error;

use async_trait::async_trait;
pub use sea_orm::{
    sea_query, ActiveEnum, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    Database, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Statement, StatementBuilder,
    TransactionError, TransactionTrait,
};
pub use time::{OffsetDateTime, PrimitiveDateTime};

/// Current UTC time as stored in timestamp columns.
pub fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();

    PrimitiveDateTime::new(now.date(), now.time())
}

pub trait TransactionErrorExt<T, E> {
    /// Convert transaction [`Result`] into a [`Result`] with
    /// a custom error.
    fn into_raw_result(self) -> Result<T, E>;
}

impl<T, E> TransactionErrorExt<T, E> for Result<T, TransactionError<E>>
where
    E: Error + From<DbErr>,
{
    fn into_raw_result(self) -> Result<T, E> {
        match self {
            Ok(val) => Ok(val),
            Err(TransactionError::Connection(err)) => Err(err.into()),
            Err(TransactionError::Transaction(err)) => Err(err),
        }
    }
}

#[async_trait]
pub trait SelectExt {
    /// Check if at least one record that satisfies a query.
    async fn exists<C: ConnectionTrait + Send>(self, db: &C) -> Result<bool, DbErr>;
}

#[async_trait]
impl<T> SelectExt for T
where
    T: QueryTrait<QueryStatement = sea_query::SelectStatement> + Send,
{
    async fn exists<C: ConnectionTrait + Send>(self, db: &C) -> Result<bool, DbErr> {
        use sea_query::{Expr, Query};

        let mut query = self.into_query();

        // SQLite rejects EXISTS over an empty select list
        query.expr(1);

        let stmt = StatementBuilder::build(
            Query::select().expr(Expr::exists(query)),
            &db.get_database_backend(),
        );

        db.query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(String::from("exists query returned no rows")))?
            .try_get_by_index(0)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{
        ActiveValue, ColumnTrait, ConnectionTrait, Database, EntityTrait, QueryFilter,
        QuerySelect, Schema,
    };

    use crate::{now, user, SelectExt};

    #[tokio::test]
    async fn exists() {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("unable to create test database");

        let builder = db.get_database_backend();
        let table = Schema::new(builder).create_table_from_entity(user::Entity);
        db.execute(builder.build(&table)).await.unwrap();

        let exists = user::Entity::find()
            .select_only()
            .filter(user::Column::Email.eq("user@example.com"))
            .exists(&db)
            .await
            .unwrap();

        assert!(!exists);

        user::Entity::insert(user::ActiveModel {
            email: ActiveValue::Set(String::from("user@example.com")),
            display_name: ActiveValue::Set(None),
            photo_url: ActiveValue::Set(None),
            role: ActiveValue::Set(user::Role::User),
            created_at: ActiveValue::Set(now()),
            ..Default::default()
        })
        .exec_without_returning(&db)
        .await
        .unwrap();

        let exists = user::Entity::find()
            .select_only()
            .filter(user::Column::Email.eq("user@example.com"))
            .exists(&db)
            .await
            .unwrap();

        assert!(exists);
    }
}
