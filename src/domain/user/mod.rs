pub mod model;
pub mod repository;

pub use model::{CreateUser, UpdateUser, User, UserFilter, UserKey, UserQuery, UserSortField};
pub use repository::UserRepository;
