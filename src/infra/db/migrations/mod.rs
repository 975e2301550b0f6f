//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users_table;
mod m20250901_000002_create_reports_table;
mod m20250901_000003_create_notifications_table;
mod m20250901_000004_create_crime_stats_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users_table::Migration),
            Box::new(m20250901_000002_create_reports_table::Migration),
            Box::new(m20250901_000003_create_notifications_table::Migration),
            Box::new(m20250901_000004_create_crime_stats_table::Migration),
        ]
    }
}
