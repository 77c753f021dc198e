pub use sea_orm_migration::prelude::*;

mod m20250701_000001_create_users_table;
mod m20250701_000002_create_mess_tables;
mod m20250701_000003_create_subscriptions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250701_000001_create_users_table::Migration),
            Box::new(m20250701_000002_create_mess_tables::Migration),
            Box::new(m20250701_000003_create_subscriptions_table::Migration),
        ]
    }
}
