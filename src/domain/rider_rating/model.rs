//! A user's rating of a rider after a delivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{DateTimeFilter, IntFilter, SortDir, StringFilter};
use crate::shared::PaginationParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderRating {
    pub id: String,
    pub rider_id: String,
    pub user_id: String,
    /// 1..=5 stars.
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateRiderRating {
    pub rider_id: String,
    pub user_id: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 1000))]
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateRiderRating {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    /// `Some(None)` removes the review text.
    pub review: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub enum RiderRatingKey {
    Id(String),
}

#[derive(Debug, Clone, Default)]
pub struct RiderRatingFilter {
    pub id: Option<StringFilter>,
    pub rider_id: Option<StringFilter>,
    pub user_id: Option<StringFilter>,
    pub rating: Option<IntFilter>,
    pub review: Option<StringFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<RiderRatingFilter>,
    pub or: Vec<RiderRatingFilter>,
    pub not: Vec<RiderRatingFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum RiderRatingSortField {
    Rating,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct RiderRatingQuery {
    pub filter: Option<RiderRatingFilter>,
    pub order: Vec<(RiderRatingSortField, SortDir)>,
    pub page: PaginationParams,
}
