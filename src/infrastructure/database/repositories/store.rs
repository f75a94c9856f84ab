//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::admin::AdminRepository;
use crate::domain::bank_details::BankDetailsRepository;
use crate::domain::delivery::DeliveryRepository;
use crate::domain::operating_area::OperatingAreaRepository;
use crate::domain::provider::RepositoryProvider;
use crate::domain::rider::RiderRepository;
use crate::domain::rider_credentials::RiderCredentialsRepository;
use crate::domain::rider_rating::RiderRatingRepository;
use crate::domain::user::UserRepository;

use super::admin_repository::SeaOrmAdminRepository;
use super::bank_details_repository::SeaOrmBankDetailsRepository;
use super::delivery_repository::SeaOrmDeliveryRepository;
use super::operating_area_repository::SeaOrmOperatingAreaRepository;
use super::rider_credentials_repository::SeaOrmRiderCredentialsRepository;
use super::rider_rating_repository::SeaOrmRiderRatingRepository;
use super::rider_repository::SeaOrmRiderRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-entity repository accessors.
///
/// ```ignore
/// let store = SeaOrmStore::new(db.clone());
/// let user = store.users().get(&UserKey::Email("a@x.com".into())).await?;
/// let open = store.deliveries().count(None).await?;
/// ```
pub struct SeaOrmStore {
    db: DatabaseConnection,
    admins: SeaOrmAdminRepository,
    users: SeaOrmUserRepository,
    riders: SeaOrmRiderRepository,
    deliveries: SeaOrmDeliveryRepository,
    operating_areas: SeaOrmOperatingAreaRepository,
    bank_details: SeaOrmBankDetailsRepository,
    rider_ratings: SeaOrmRiderRatingRepository,
    rider_credentials: SeaOrmRiderCredentialsRepository,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            admins: SeaOrmAdminRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            riders: SeaOrmRiderRepository::new(db.clone()),
            deliveries: SeaOrmDeliveryRepository::new(db.clone()),
            operating_areas: SeaOrmOperatingAreaRepository::new(db.clone()),
            bank_details: SeaOrmBankDetailsRepository::new(db.clone()),
            rider_ratings: SeaOrmRiderRatingRepository::new(db.clone()),
            rider_credentials: SeaOrmRiderCredentialsRepository::new(db.clone()),
            db,
        }
    }

    /// Raw connection, used by the batch executor and relation loader.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RepositoryProvider for SeaOrmStore {
    fn admins(&self) -> &dyn AdminRepository {
        &self.admins
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn riders(&self) -> &dyn RiderRepository {
        &self.riders
    }

    fn deliveries(&self) -> &dyn DeliveryRepository {
        &self.deliveries
    }

    fn operating_areas(&self) -> &dyn OperatingAreaRepository {
        &self.operating_areas
    }

    fn bank_details(&self) -> &dyn BankDetailsRepository {
        &self.bank_details
    }

    fn rider_ratings(&self) -> &dyn RiderRatingRepository {
        &self.rider_ratings
    }

    fn rider_credentials(&self) -> &dyn RiderCredentialsRepository {
        &self.rider_credentials
    }
}
