pub mod model;
pub mod repository;

pub use model::{
    CreateRiderCredentials, CredentialStatus, RiderCredentials, RiderCredentialsFilter,
    RiderCredentialsKey, RiderCredentialsQuery, RiderCredentialsSortField, UpdateRiderCredentials,
};
pub use repository::RiderCredentialsRepository;
