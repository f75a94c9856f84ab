//! Explicit relation loading.
//!
//! Relations are never resolved implicitly on a primary fetch; callers ask
//! for them in a separate call. Every method issues one query per relation
//! regardless of how many parent rows are passed in (batched by FK set),
//! and returns a map keyed by parent id.
//!
//! Ordering of a related collection is independent of the parent ordering;
//! pass an `order` slice to sort it, or leave it empty.

use std::collections::HashMap;

use async_trait::async_trait;

use super::bank_details::BankDetails;
use super::delivery::{Delivery, DeliverySortField};
use super::rider::Rider;
use super::rider_credentials::{RiderCredentials, RiderCredentialsSortField};
use super::rider_rating::{RiderRating, RiderRatingSortField};
use super::user::User;
use crate::query::SortDir;
use crate::shared::StoreResult;

#[async_trait]
pub trait RelationLoader: Send + Sync {
    // User 1:N
    async fn deliveries_for_users(
        &self,
        user_ids: &[String],
        order: &[(DeliverySortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<Delivery>>>;
    async fn ratings_for_users(
        &self,
        user_ids: &[String],
        order: &[(RiderRatingSortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<RiderRating>>>;

    // Rider 1:N / 1:1
    async fn deliveries_for_riders(
        &self,
        rider_ids: &[String],
        order: &[(DeliverySortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<Delivery>>>;
    async fn ratings_for_riders(
        &self,
        rider_ids: &[String],
        order: &[(RiderRatingSortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<RiderRating>>>;
    async fn credentials_for_riders(
        &self,
        rider_ids: &[String],
        order: &[(RiderCredentialsSortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<RiderCredentials>>>;
    async fn bank_details_for_riders(
        &self,
        rider_ids: &[String],
    ) -> StoreResult<HashMap<String, BankDetails>>;

    // Delivery N:1 — maps keyed by the parent (user/rider) id collected
    // from the passed rows.
    async fn users_for_deliveries(
        &self,
        deliveries: &[Delivery],
    ) -> StoreResult<HashMap<String, User>>;
    async fn riders_for_deliveries(
        &self,
        deliveries: &[Delivery],
    ) -> StoreResult<HashMap<String, Rider>>;
}
