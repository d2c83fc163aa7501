//! Delivery rider application.
//!
//! Riders apply through a public form and start in the [`PENDING`] status.
//! Any other status is supplied by the reviewing dashboard user; only
//! [`APPROVED`] has a side effect on the matching user's role.

use sea_orm::entity::prelude::*;

pub const PENDING: &str = "pending";
pub const APPROVED: &str = "approved";

/// Rider model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "riders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub region: String,
    pub district: String,
    pub status: String,
    pub created_at: TimeDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
