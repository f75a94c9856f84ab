//! Admin repository interface

use async_trait::async_trait;

use super::model::{Admin, AdminFilter, AdminKey, AdminQuery, CreateAdmin, UpdateAdmin};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_unique(&self, key: &AdminKey) -> StoreResult<Option<Admin>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &AdminKey) -> StoreResult<Admin>;
    async fn list(&self, query: &AdminQuery) -> StoreResult<PaginatedResult<Admin>>;
    async fn count(&self, filter: Option<&AdminFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateAdmin) -> StoreResult<Admin>;
    async fn update(&self, key: &AdminKey, data: UpdateAdmin) -> StoreResult<Admin>;
    async fn delete(&self, key: &AdminKey) -> StoreResult<()>;
}
