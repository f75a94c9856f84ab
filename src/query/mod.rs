//! Structured query filters.
//!
//! Per-field operator structs composed into per-entity filter DTOs
//! (see `domain::*`). Lowering to storage predicates lives in
//! `infrastructure::database::predicate`.

pub mod filter;
pub mod order;

pub use filter::{
    BoolFilter, DateTimeFilter, EnumFilter, FloatFilter, IntFilter, JsonFilter, StringFilter,
};
pub use order::SortDir;
