//! A package delivery requested by a user and carried by a rider.
//!
//! `pickup_coordinate` / `delivery_coordinate` are JSON documents
//! (`{"lat": .., "lng": ..}`); `delivery_code` is the short confirmation
//! code the recipient reads back to the rider at handover.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{
    BoolFilter, DateTimeFilter, EnumFilter, JsonFilter, SortDir, StringFilter,
};
use crate::shared::PaginationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    PickedUp,
    Delivered,
    Rejected,
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: String,
    pub user_id: String,
    pub rider_id: Option<String>,
    pub pickup_coordinate: serde_json::Value,
    pub delivery_coordinate: serde_json::Value,
    pub delivery_code: Option<String>,
    pub is_pickedup: bool,
    pub is_delivered: bool,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn is_assigned(&self) -> bool {
        self.rider_id.is_some()
    }

    /// Still awaiting handover to the recipient.
    pub fn in_flight(&self) -> bool {
        !self.is_delivered && self.status != DeliveryStatus::Rejected
    }
}

/// Six-digit handover confirmation code.
pub fn generate_delivery_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

#[derive(Debug, Clone, Validate)]
pub struct CreateDelivery {
    pub user_id: String,
    pub rider_id: Option<String>,
    pub pickup_coordinate: serde_json::Value,
    pub delivery_coordinate: serde_json::Value,
    #[validate(length(min = 4, max = 12))]
    pub delivery_code: Option<String>,
    pub status: Option<DeliveryStatus>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateDelivery {
    /// `Some(None)` unassigns the rider.
    pub rider_id: Option<Option<String>>,
    pub pickup_coordinate: Option<serde_json::Value>,
    pub delivery_coordinate: Option<serde_json::Value>,
    /// `Some(None)` clears the code.
    pub delivery_code: Option<Option<String>>,
    pub is_pickedup: Option<bool>,
    pub is_delivered: Option<bool>,
    pub status: Option<DeliveryStatus>,
}

#[derive(Debug, Clone)]
pub enum DeliveryKey {
    Id(String),
    DeliveryCode(String),
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryFilter {
    pub id: Option<StringFilter>,
    pub user_id: Option<StringFilter>,
    pub rider_id: Option<StringFilter>,
    pub pickup_coordinate: Option<JsonFilter>,
    pub delivery_coordinate: Option<JsonFilter>,
    pub delivery_code: Option<StringFilter>,
    pub is_pickedup: Option<BoolFilter>,
    pub is_delivered: Option<BoolFilter>,
    pub status: Option<EnumFilter<DeliveryStatus>>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,
    pub and: Vec<DeliveryFilter>,
    pub or: Vec<DeliveryFilter>,
    pub not: Vec<DeliveryFilter>,
}

#[derive(Debug, Clone, Copy)]
pub enum DeliverySortField {
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryQuery {
    pub filter: Option<DeliveryFilter>,
    pub order: Vec<(DeliverySortField, SortDir)>,
    pub page: PaginationParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Delivery {
        Delivery {
            id: "d1".into(),
            user_id: "u1".into(),
            rider_id: None,
            pickup_coordinate: serde_json::json!({"lat": 6.45, "lng": 3.39}),
            delivery_coordinate: serde_json::json!({"lat": 6.52, "lng": 3.37}),
            delivery_code: None,
            is_pickedup: false,
            is_delivered: false,
            status: DeliveryStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn new_delivery_is_unassigned_and_in_flight() {
        let d = sample();
        assert!(!d.is_assigned());
        assert!(d.in_flight());
        assert_eq!(d.status, DeliveryStatus::Pending);
    }

    #[test]
    fn rejected_delivery_is_not_in_flight() {
        let mut d = sample();
        d.status = DeliveryStatus::Rejected;
        assert!(!d.in_flight());
    }

    #[test]
    fn delivery_code_is_six_digits() {
        let code = generate_delivery_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}
