//! Rider repository interface

use async_trait::async_trait;

use super::model::{CreateRider, Rider, RiderFilter, RiderKey, RiderQuery, UpdateRider};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait RiderRepository: Send + Sync {
    async fn find_unique(&self, key: &RiderKey) -> StoreResult<Option<Rider>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &RiderKey) -> StoreResult<Rider>;
    async fn list(&self, query: &RiderQuery) -> StoreResult<PaginatedResult<Rider>>;
    async fn count(&self, filter: Option<&RiderFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateRider) -> StoreResult<Rider>;
    async fn update(&self, key: &RiderKey, data: UpdateRider) -> StoreResult<Rider>;
    async fn delete(&self, key: &RiderKey) -> StoreResult<()>;
}
