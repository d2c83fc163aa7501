pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_parcels_table;
mod m20240601_000002_create_payments_table;
mod m20240601_000003_create_users_table;
mod m20240601_000004_create_riders_table;

pub(crate) use m20240601_000001_create_parcels_table::Parcels;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_parcels_table::Migration),
            Box::new(m20240601_000002_create_payments_table::Migration),
            Box::new(m20240601_000003_create_users_table::Migration),
            Box::new(m20240601_000004_create_riders_table::Migration),
        ]
    }
}
