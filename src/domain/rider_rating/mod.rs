pub mod model;
pub mod repository;

pub use model::{
    CreateRiderRating, RiderRating, RiderRatingFilter, RiderRatingKey, RiderRatingQuery,
    RiderRatingSortField, UpdateRiderRating,
};
pub use repository::RiderRatingRepository;
