pub mod model;
pub mod repository;

pub use model::{
    generate_delivery_code, CreateDelivery, Delivery, DeliveryFilter, DeliveryKey, DeliveryQuery,
    DeliverySortField, DeliveryStatus, UpdateDelivery,
};
pub use repository::DeliveryRepository;
