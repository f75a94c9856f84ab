use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Whether this error is likely transient (driver/connection level)
    /// and the operation may succeed if retried by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Storage(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
