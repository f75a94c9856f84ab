pub mod admin;
pub mod bank_details;
pub mod batch;
pub mod delivery;
pub mod operating_area;
pub mod provider;
pub mod relations;
pub mod rider;
pub mod rider_credentials;
pub mod rider_rating;
pub mod user;

// Re-export commonly used types
pub use admin::{Admin, AdminKey, AdminRepository, Role};
pub use bank_details::{BankDetails, BankDetailsKey, BankDetailsRepository};
pub use delivery::{Delivery, DeliveryKey, DeliveryRepository, DeliveryStatus};
pub use operating_area::{
    OperatingArea, OperatingAreaKey, OperatingAreaRepository, OperatingAreaStatus,
};
pub use batch::BatchOp;
pub use provider::RepositoryProvider;
pub use relations::RelationLoader;
pub use rider::{Rider, RiderKey, RiderRepository, RiderStatus};
pub use rider_credentials::{
    CredentialStatus, RiderCredentials, RiderCredentialsKey, RiderCredentialsRepository,
};
pub use rider_rating::{RiderRating, RiderRatingKey, RiderRatingRepository};
pub use user::{User, UserKey, UserRepository};
