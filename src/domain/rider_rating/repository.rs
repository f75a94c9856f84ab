//! Rider-rating repository interface

use async_trait::async_trait;

use super::model::{
    CreateRiderRating, RiderRating, RiderRatingFilter, RiderRatingKey, RiderRatingQuery,
    UpdateRiderRating,
};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait RiderRatingRepository: Send + Sync {
    async fn find_unique(&self, key: &RiderRatingKey) -> StoreResult<Option<RiderRating>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &RiderRatingKey) -> StoreResult<RiderRating>;
    async fn list(&self, query: &RiderRatingQuery) -> StoreResult<PaginatedResult<RiderRating>>;
    async fn count(&self, filter: Option<&RiderRatingFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateRiderRating) -> StoreResult<RiderRating>;
    async fn update(
        &self,
        key: &RiderRatingKey,
        data: UpdateRiderRating,
    ) -> StoreResult<RiderRating>;
    async fn delete(&self, key: &RiderRatingKey) -> StoreResult<()>;
}
