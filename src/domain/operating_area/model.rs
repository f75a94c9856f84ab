//! Geographic zone the platform serves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{DateTimeFilter, EnumFilter, SortDir, StringFilter};
use crate::shared::PaginationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingAreaStatus {
    Active,
    Inactive,
}

impl Default for OperatingAreaStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingArea {
    pub id: String,
    pub name: String,
    pub status: OperatingAreaStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateOperatingArea {
    #[validate(length(min = 1))]
    pub name: String,
    pub status: Option<OperatingAreaStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOperatingArea {
    pub name: Option<String>,
    pub status: Option<OperatingAreaStatus>,
}

#[derive(Debug, Clone)]
pub enum OperatingAreaKey {
    Id(String),
}

#[derive(Debug, Clone, Default)]
pub struct OperatingAreaFilter {
    pub id: Option<StringFilter>,
    pub name: Option<StringFilter>,
    pub status: Option<EnumFilter<OperatingAreaStatus>>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<OperatingAreaFilter>,
    pub or: Vec<OperatingAreaFilter>,
    pub not: Vec<OperatingAreaFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum OperatingAreaSortField {
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct OperatingAreaQuery {
    pub filter: Option<OperatingAreaFilter>,
    pub order: Vec<(OperatingAreaSortField, SortDir)>,
    pub page: PaginationParams,
}
