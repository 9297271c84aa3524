// ABOUTME: SeaORM migration module for database schema management
// ABOUTME: Runs the initial schema creation on startup and in tests

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250601_000001_create_initial_tables::Migration)]
    }
}

pub mod m20250601_000001_create_initial_tables;
