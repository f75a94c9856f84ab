//! Customer account. `current_position` is a free-form JSON document
//! (`{"lat": .., "lng": ..}`) written by the mobile client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{DateTimeFilter, JsonFilter, SortDir, StringFilter};
use crate::shared::PaginationParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    /// bcrypt hash, never the raw password.
    pub password: String,
    pub current_position: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateUser {
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
    pub current_position: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateUser {
    pub fullname: Option<String>,
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    /// `Some(None)` clears the stored position.
    pub current_position: Option<Option<serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum UserKey {
    Id(String),
    Username(String),
    Email(String),
    Phone(String),
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<StringFilter>,
    pub fullname: Option<StringFilter>,
    pub username: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub phone: Option<StringFilter>,
    pub current_position: Option<JsonFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<UserFilter>,
    pub or: Vec<UserFilter>,
    pub not: Vec<UserFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum UserSortField {
    Username,
    Email,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub filter: Option<UserFilter>,
    pub order: Vec<(UserSortField, SortDir)>,
    pub page: PaginationParams,
}
