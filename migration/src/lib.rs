pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_table;

/// Width of `users.slug`; derived slugs never exceed it.
pub const SLUG_MAX_LENGTH: u32 = 128;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_users_table::Migration)]
    }
}
