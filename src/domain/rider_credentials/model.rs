//! Identity and vehicle documents a rider submits for verification.
//!
//! The schema allows several rows per rider (re-submissions); the unique
//! nin / driver_license / plate_number columns keep any single document
//! from appearing twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{DateTimeFilter, EnumFilter, SortDir, StringFilter};
use crate::shared::PaginationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for CredentialStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderCredentials {
    pub id: String,
    pub rider_id: String,
    /// National identification number.
    pub nin: String,
    pub driver_license: String,
    pub plate_number: String,
    pub status: CredentialStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateRiderCredentials {
    pub rider_id: String,
    #[validate(length(min = 6, max = 20))]
    pub nin: String,
    #[validate(length(min = 4, max = 30))]
    pub driver_license: String,
    #[validate(length(min = 4, max = 15))]
    pub plate_number: String,
    pub status: Option<CredentialStatus>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateRiderCredentials {
    #[validate(length(min = 6, max = 20))]
    pub nin: Option<String>,
    #[validate(length(min = 4, max = 30))]
    pub driver_license: Option<String>,
    #[validate(length(min = 4, max = 15))]
    pub plate_number: Option<String>,
    pub status: Option<CredentialStatus>,
}

#[derive(Debug, Clone)]
pub enum RiderCredentialsKey {
    Id(String),
    Nin(String),
    DriverLicense(String),
    PlateNumber(String),
}

#[derive(Debug, Clone, Default)]
pub struct RiderCredentialsFilter {
    pub id: Option<StringFilter>,
    pub rider_id: Option<StringFilter>,
    pub nin: Option<StringFilter>,
    pub driver_license: Option<StringFilter>,
    pub plate_number: Option<StringFilter>,
    pub status: Option<EnumFilter<CredentialStatus>>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<RiderCredentialsFilter>,
    pub or: Vec<RiderCredentialsFilter>,
    pub not: Vec<RiderCredentialsFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum RiderCredentialsSortField {
    Status,
    CreatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct RiderCredentialsQuery {
    pub filter: Option<RiderCredentialsFilter>,
    pub order: Vec<(RiderCredentialsSortField, SortDir)>,
    pub page: PaginationParams,
}
