pub mod model;
pub mod repository;

pub use model::{
    CreateRider, Rider, RiderFilter, RiderKey, RiderQuery, RiderSortField, RiderStatus,
    UpdateRider,
};
pub use repository::RiderRepository;
