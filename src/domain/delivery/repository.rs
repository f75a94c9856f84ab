//! Delivery repository interface

use async_trait::async_trait;

use super::model::{
    CreateDelivery, Delivery, DeliveryFilter, DeliveryKey, DeliveryQuery, UpdateDelivery,
};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    async fn find_unique(&self, key: &DeliveryKey) -> StoreResult<Option<Delivery>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &DeliveryKey) -> StoreResult<Delivery>;
    async fn list(&self, query: &DeliveryQuery) -> StoreResult<PaginatedResult<Delivery>>;
    async fn count(&self, filter: Option<&DeliveryFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateDelivery) -> StoreResult<Delivery>;
    async fn update(&self, key: &DeliveryKey, data: UpdateDelivery) -> StoreResult<Delivery>;
    async fn delete(&self, key: &DeliveryKey) -> StoreResult<()>;
}
