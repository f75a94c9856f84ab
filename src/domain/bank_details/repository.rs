//! Bank-details repository interface

use async_trait::async_trait;

use super::model::{
    BankDetails, BankDetailsFilter, BankDetailsKey, BankDetailsQuery, CreateBankDetails,
    UpdateBankDetails,
};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait BankDetailsRepository: Send + Sync {
    async fn find_unique(&self, key: &BankDetailsKey) -> StoreResult<Option<BankDetails>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &BankDetailsKey) -> StoreResult<BankDetails>;
    async fn list(&self, query: &BankDetailsQuery) -> StoreResult<PaginatedResult<BankDetails>>;
    async fn count(&self, filter: Option<&BankDetailsFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateBankDetails) -> StoreResult<BankDetails>;
    async fn update(
        &self,
        key: &BankDetailsKey,
        data: UpdateBankDetails,
    ) -> StoreResult<BankDetails>;
    async fn delete(&self, key: &BankDetailsKey) -> StoreResult<()>;
}
