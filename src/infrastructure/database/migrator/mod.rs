//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_admins;
mod m20250101_000002_create_users;
mod m20250101_000003_create_riders;
mod m20250101_000004_create_deliveries;
mod m20250101_000005_create_operating_areas;
mod m20250101_000006_create_bank_details;
mod m20250101_000007_create_rider_ratings;
mod m20250101_000008_create_rider_credentials;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_admins::Migration),
            Box::new(m20250101_000002_create_users::Migration),
            Box::new(m20250101_000003_create_riders::Migration),
            Box::new(m20250101_000004_create_deliveries::Migration),
            Box::new(m20250101_000005_create_operating_areas::Migration),
            Box::new(m20250101_000006_create_bank_details::Migration),
            Box::new(m20250101_000007_create_rider_ratings::Migration),
            Box::new(m20250101_000008_create_rider_credentials::Migration),
        ]
    }
}
