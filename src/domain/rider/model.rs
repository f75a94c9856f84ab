//! Courier account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{BoolFilter, DateTimeFilter, EnumFilter, FloatFilter, SortDir, StringFilter};
use crate::shared::PaginationParams;

/// Rider account lifecycle: onboarding review, then active service or
/// suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiderStatus {
    Pending,
    Approved,
    Suspended,
    Inactive,
}

impl Default for RiderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    /// bcrypt hash, never the raw password.
    pub password: String,
    /// Mean of `RiderRating.rating`, maintained by application jobs.
    pub avg_rating: f64,
    pub status: RiderStatus,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateRider {
    #[validate(length(min = 1))]
    pub fullname: String,
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7, max = 20))]
    pub phone: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub status: Option<RiderStatus>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateRider {
    pub fullname: Option<String>,
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub avg_rating: Option<f64>,
    pub status: Option<RiderStatus>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone)]
pub enum RiderKey {
    Id(String),
    Username(String),
    Email(String),
    Phone(String),
}

#[derive(Debug, Clone, Default)]
pub struct RiderFilter {
    pub id: Option<StringFilter>,
    pub fullname: Option<StringFilter>,
    pub username: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub phone: Option<StringFilter>,
    pub avg_rating: Option<FloatFilter>,
    pub status: Option<EnumFilter<RiderStatus>>,
    pub is_verified: Option<BoolFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<RiderFilter>,
    pub or: Vec<RiderFilter>,
    pub not: Vec<RiderFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum RiderSortField {
    Username,
    AvgRating,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct RiderQuery {
    pub filter: Option<RiderFilter>,
    pub order: Vec<(RiderSortField, SortDir)>,
    pub page: PaginationParams,
}
