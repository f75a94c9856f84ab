//! User repository interface

use async_trait::async_trait;

use super::model::{CreateUser, UpdateUser, User, UserFilter, UserKey, UserQuery};
use crate::shared::{PaginatedResult, StoreResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_unique(&self, key: &UserKey) -> StoreResult<Option<User>>;
    /// `find_unique` with `NotFound` semantics.
    async fn get(&self, key: &UserKey) -> StoreResult<User>;
    async fn list(&self, query: &UserQuery) -> StoreResult<PaginatedResult<User>>;
    async fn count(&self, filter: Option<&UserFilter>) -> StoreResult<u64>;
    async fn create(&self, data: CreateUser) -> StoreResult<User>;
    async fn update(&self, key: &UserKey, data: UpdateUser) -> StoreResult<User>;
    async fn delete(&self, key: &UserKey) -> StoreResult<()>;
}
