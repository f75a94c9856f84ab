//! All-or-nothing batch writes.
//!
//! One variant per entity write operation; `SeaOrmStore::execute_batch`
//! runs a whole list inside a single storage transaction.

use super::admin::{AdminKey, CreateAdmin, UpdateAdmin};
use super::bank_details::{BankDetailsKey, CreateBankDetails, UpdateBankDetails};
use super::delivery::{CreateDelivery, DeliveryKey, UpdateDelivery};
use super::operating_area::{CreateOperatingArea, OperatingAreaKey, UpdateOperatingArea};
use super::rider::{CreateRider, RiderKey, UpdateRider};
use super::rider_credentials::{
    CreateRiderCredentials, RiderCredentialsKey, UpdateRiderCredentials,
};
use super::rider_rating::{CreateRiderRating, RiderRatingKey, UpdateRiderRating};
use super::user::{CreateUser, UpdateUser, UserKey};

#[derive(Debug, Clone)]
pub enum BatchOp {
    CreateAdmin(CreateAdmin),
    UpdateAdmin(AdminKey, UpdateAdmin),
    DeleteAdmin(AdminKey),

    CreateUser(CreateUser),
    UpdateUser(UserKey, UpdateUser),
    DeleteUser(UserKey),

    CreateRider(CreateRider),
    UpdateRider(RiderKey, UpdateRider),
    DeleteRider(RiderKey),

    CreateDelivery(CreateDelivery),
    UpdateDelivery(DeliveryKey, UpdateDelivery),
    DeleteDelivery(DeliveryKey),

    CreateOperatingArea(CreateOperatingArea),
    UpdateOperatingArea(OperatingAreaKey, UpdateOperatingArea),
    DeleteOperatingArea(OperatingAreaKey),

    CreateBankDetails(CreateBankDetails),
    UpdateBankDetails(BankDetailsKey, UpdateBankDetails),
    DeleteBankDetails(BankDetailsKey),

    CreateRiderRating(CreateRiderRating),
    UpdateRiderRating(RiderRatingKey, UpdateRiderRating),
    DeleteRiderRating(RiderRatingKey),

    CreateRiderCredentials(CreateRiderCredentials),
    UpdateRiderCredentials(RiderCredentialsKey, UpdateRiderCredentials),
    DeleteRiderCredentials(RiderCredentialsKey),
}
