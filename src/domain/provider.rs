//! Unified access to all entity repositories.
//!
//! Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(store: &dyn RepositoryProvider) -> StoreResult<()> {
//!     let rider = store.riders().get(&RiderKey::Email("r1@x.com".into())).await?;
//!     let open = store
//!         .deliveries()
//!         .count(Some(&DeliveryFilter {
//!             rider_id: Some(StringFilter::equals(rider.id)),
//!             is_delivered: Some(BoolFilter::equals(false)),
//!             ..Default::default()
//!         }))
//!         .await?;
//!     Ok(())
//! }
//! ```

use super::admin::AdminRepository;
use super::bank_details::BankDetailsRepository;
use super::delivery::DeliveryRepository;
use super::operating_area::OperatingAreaRepository;
use super::rider::RiderRepository;
use super::rider_credentials::RiderCredentialsRepository;
use super::rider_rating::RiderRatingRepository;
use super::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn admins(&self) -> &dyn AdminRepository;
    fn users(&self) -> &dyn UserRepository;
    fn riders(&self) -> &dyn RiderRepository;
    fn deliveries(&self) -> &dyn DeliveryRepository;
    fn operating_areas(&self) -> &dyn OperatingAreaRepository;
    fn bank_details(&self) -> &dyn BankDetailsRepository;
    fn rider_ratings(&self) -> &dyn RiderRatingRepository;
    fn rider_credentials(&self) -> &dyn RiderCredentialsRepository;
}
