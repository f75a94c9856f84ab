//! Payout account for a rider. One row per rider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{DateTimeFilter, SortDir, StringFilter};
use crate::shared::PaginationParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDetails {
    pub id: String,
    pub rider_id: String,
    pub bank_name: String,
    pub account_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateBankDetails {
    pub rider_id: String,
    #[validate(length(min = 1))]
    pub bank_name: String,
    #[validate(length(min = 6, max = 20))]
    pub account_number: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateBankDetails {
    pub bank_name: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub account_number: Option<String>,
}

#[derive(Debug, Clone)]
pub enum BankDetailsKey {
    Id(String),
    /// One-to-one with Rider, so the FK is itself a unique key.
    RiderId(String),
}

#[derive(Debug, Clone, Default)]
pub struct BankDetailsFilter {
    pub id: Option<StringFilter>,
    pub rider_id: Option<StringFilter>,
    pub bank_name: Option<StringFilter>,
    pub account_number: Option<StringFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<BankDetailsFilter>,
    pub or: Vec<BankDetailsFilter>,
    pub not: Vec<BankDetailsFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum BankDetailsSortField {
    BankName,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct BankDetailsQuery {
    pub filter: Option<BankDetailsFilter>,
    pub order: Vec<(BankDetailsSortField, SortDir)>,
    pub page: PaginationParams,
}
