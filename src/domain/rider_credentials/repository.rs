//! Rider-credentials repository interface

use async_trait::async_trait;

use super::model::{
    CreateRiderCredentials, RiderCredentials, RiderCredentialsFilter, RiderCredentialsKey,
    RiderCredentialsQuery, UpdateRiderCredentials,
};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait RiderCredentialsRepository: Send + Sync {
    async fn find_unique(&self, key: &RiderCredentialsKey) -> StoreResult<Option<RiderCredentials>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &RiderCredentialsKey) -> StoreResult<RiderCredentials>;
    async fn list(
        &self,
        query: &RiderCredentialsQuery,
    ) -> StoreResult<PaginatedResult<RiderCredentials>>;
    async fn count(&self, filter: Option<&RiderCredentialsFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateRiderCredentials) -> StoreResult<RiderCredentials>;
    async fn update(
        &self,
        key: &RiderCredentialsKey,
        data: UpdateRiderCredentials,
    ) -> StoreResult<RiderCredentials>;
    async fn delete(&self, key: &RiderCredentialsKey) -> StoreResult<()>;
}
