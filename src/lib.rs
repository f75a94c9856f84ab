//! # Dispatch Store
//!
//! Hand-written data-access layer for the dispatch delivery platform:
//! users, riders, deliveries and the records hanging off them.
//!
//! ## Architecture
//!
//! - **domain**: plain entity structs, per-entity repository traits,
//!   request DTOs (filters, keys, create/update payloads)
//! - **query**: per-field filter operator structs shared by every entity
//! - **infrastructure**: SeaORM entities, migrations and the repository /
//!   relation-loader / batch implementations
//!
//! Reads go through the repositories (`find_unique` / `get` / `list` /
//! `count`); relations are loaded explicitly and batched through
//! [`domain::RelationLoader`]; multi-statement writes go through
//! [`infrastructure::SeaOrmStore::execute_batch`] with all-or-nothing
//! commit semantics.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod query;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRelationLoader, SeaOrmStore};

pub use shared::{PaginatedResult, PaginationParams, StoreError, StoreResult};
