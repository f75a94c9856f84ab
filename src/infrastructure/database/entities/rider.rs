//! Rider entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rider account state
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RiderStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Suspended")]
    Suspended,
    #[sea_orm(string_value = "Inactive")]
    Inactive,
}

/// Rider model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "riders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub fullname: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub password: String,
    pub avg_rating: f64,
    pub status: RiderStatus,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::delivery::Entity")]
    Deliveries,
    #[sea_orm(has_one = "super::bank_details::Entity")]
    BankDetails,
    #[sea_orm(has_many = "super::rider_rating::Entity")]
    RiderRatings,
    #[sea_orm(has_many = "super::rider_credentials::Entity")]
    RiderCredentials,
}

impl Related<super::delivery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliveries.def()
    }
}

impl Related<super::bank_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankDetails.def()
    }
}

impl Related<super::rider_rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RiderRatings.def()
    }
}

impl Related<super::rider_credentials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RiderCredentials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
