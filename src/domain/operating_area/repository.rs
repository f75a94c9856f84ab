//! Operating-area repository interface

use async_trait::async_trait;

use super::model::{
    CreateOperatingArea, OperatingArea, OperatingAreaFilter, OperatingAreaKey, OperatingAreaQuery,
    UpdateOperatingArea,
};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait OperatingAreaRepository: Send + Sync {
    async fn find_unique(&self, key: &OperatingAreaKey) -> StoreResult<Option<OperatingArea>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &OperatingAreaKey) -> StoreResult<OperatingArea>;
    async fn list(&self, query: &OperatingAreaQuery) -> StoreResult<PaginatedResult<OperatingArea>>;
    async fn count(&self, filter: Option<&OperatingAreaFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateOperatingArea) -> StoreResult<OperatingArea>;
    async fn update(
        &self,
        key: &OperatingAreaKey,
        data: UpdateOperatingArea,
    ) -> StoreResult<OperatingArea>;
    async fn delete(&self, key: &OperatingAreaKey) -> StoreResult<()>;
}
