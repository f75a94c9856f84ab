pub mod model;
pub mod repository;

pub use model::{
    CreateOperatingArea, OperatingArea, OperatingAreaFilter, OperatingAreaKey, OperatingAreaQuery,
    OperatingAreaSortField, OperatingAreaStatus, UpdateOperatingArea,
};
pub use repository::OperatingAreaRepository;
