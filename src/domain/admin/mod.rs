pub mod model;
pub mod repository;

pub use model::{
    Admin, AdminFilter, AdminKey, AdminQuery, AdminSortField, CreateAdmin, Role, UpdateAdmin,
};
pub use repository::AdminRepository;
