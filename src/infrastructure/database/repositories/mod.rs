//! Database repository implementations
//!
//! Per-entity SeaORM repositories + unified `SeaOrmStore` provider.
//! Write paths are free functions generic over `ConnectionTrait` so the
//! batch executor can run them inside one transaction.

pub mod admin_repository;
pub mod bank_details_repository;
pub mod delivery_repository;
pub mod operating_area_repository;
pub mod rider_credentials_repository;
pub mod rider_rating_repository;
pub mod rider_repository;
pub mod store;
pub mod user_repository;

pub use store::SeaOrmStore;

use sea_orm::DbErr;

use crate::shared::StoreError;

/// Map an insert/update failure to a domain error. The sqlite and
/// postgres drivers both surface unique-index collisions in the message
/// text ("UNIQUE constraint failed" / "duplicate key value").
pub(crate) fn map_write_err(entity: &'static str, e: DbErr) -> StoreError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        StoreError::ConstraintViolation(format!("{}: unique field already taken", entity))
    } else {
        StoreError::Storage(e)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use crate::domain::rider::{CreateRider, Rider};
    use crate::domain::user::{CreateUser, User};
    use crate::infrastructure::database::migrator::Migrator;

    pub async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("apply migrations");
        db
    }

    pub async fn seed_user(db: &DatabaseConnection, tag: &str) -> User {
        super::user_repository::insert_user(
            db,
            CreateUser {
                fullname: format!("Seed User {}", tag),
                username: format!("seed_user_{}", tag),
                email: format!("seed.{}@example.com", tag),
                phone: format!("+234811{}", tag),
                password: "seedpassword".to_string(),
                current_position: None,
            },
        )
        .await
        .expect("seed user")
    }

    pub async fn seed_rider(db: &DatabaseConnection, tag: &str) -> Rider {
        super::rider_repository::insert_rider(
            db,
            CreateRider {
                fullname: format!("Seed Rider {}", tag),
                username: format!("seed_rider_{}", tag),
                email: format!("seed.rider.{}@example.com", tag),
                phone: format!("+234822{}", tag),
                password: "seedpassword".to_string(),
                status: None,
            },
        )
        .await
        .expect("seed rider")
    }
}
