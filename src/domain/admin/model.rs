//! Back-office administrator account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{DateTimeFilter, EnumFilter, SortDir, StringFilter};
use crate::shared::PaginationParams;

/// Platform role. Only the admins table stores one; users and riders are
/// implied by their own tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Rider,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// bcrypt hash, never the raw password.
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateAdmin {
    #[validate(length(min = 1))]
    pub fullname: String,
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateAdmin {
    pub fullname: Option<String>,
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Declared unique keys for admin lookups.
#[derive(Debug, Clone)]
pub enum AdminKey {
    Id(String),
    Username(String),
    Email(String),
}

#[derive(Debug, Clone, Default)]
pub struct AdminFilter {
    pub id: Option<StringFilter>,
    pub fullname: Option<StringFilter>,
    pub username: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub role: Option<EnumFilter<Role>>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<AdminFilter>,
    pub or: Vec<AdminFilter>,
    pub not: Vec<AdminFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum AdminSortField {
    Username,
    Email,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct AdminQuery {
    pub filter: Option<AdminFilter>,
    pub order: Vec<(AdminSortField, SortDir)>,
    pub page: PaginationParams,
}
