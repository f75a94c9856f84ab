//! Per-field filter operators.
//!
//! Each struct covers the operator set valid for one column type; entity
//! filter DTOs expose the matching struct per field, so a string operator
//! on a numeric column is unrepresentable. All operators on one struct are
//! combined with AND.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StringFilter {
    pub equals: Option<String>,
    pub r#in: Option<Vec<String>>,
    pub not_in: Option<Vec<String>>,
    pub lt: Option<String>,
    pub lte: Option<String>,
    pub gt: Option<String>,
    pub gte: Option<String>,
    pub contains: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
}

impl StringFilter {
    pub fn equals(value: impl Into<String>) -> Self {
        Self {
            equals: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntFilter {
    pub equals: Option<i32>,
    pub r#in: Option<Vec<i32>>,
    pub not_in: Option<Vec<i32>>,
    pub lt: Option<i32>,
    pub lte: Option<i32>,
    pub gt: Option<i32>,
    pub gte: Option<i32>,
}

impl IntFilter {
    pub fn equals(value: i32) -> Self {
        Self {
            equals: Some(value),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloatFilter {
    pub equals: Option<f64>,
    pub r#in: Option<Vec<f64>>,
    pub not_in: Option<Vec<f64>>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
    pub gt: Option<f64>,
    pub gte: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoolFilter {
    pub equals: Option<bool>,
}

impl BoolFilter {
    pub fn equals(value: bool) -> Self {
        Self {
            equals: Some(value),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateTimeFilter {
    pub equals: Option<DateTime<Utc>>,
    pub r#in: Option<Vec<DateTime<Utc>>>,
    pub not_in: Option<Vec<DateTime<Utc>>>,
    pub lt: Option<DateTime<Utc>>,
    pub lte: Option<DateTime<Utc>>,
    pub gt: Option<DateTime<Utc>>,
    pub gte: Option<DateTime<Utc>>,
}

/// Operators for closed enum columns (entity state fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumFilter<T> {
    pub equals: Option<T>,
    pub r#in: Option<Vec<T>>,
    pub not_in: Option<Vec<T>>,
}

impl<T> Default for EnumFilter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            r#in: None,
            not_in: None,
        }
    }
}

impl<T> EnumFilter<T> {
    pub fn equals(value: T) -> Self {
        Self {
            equals: Some(value),
            ..Default::default()
        }
    }
}

/// Operators for JSON columns (`current_position`, `pickup_coordinate`,
/// `delivery_coordinate`).
///
/// `path` selects a location inside the document (empty = the whole
/// document is rejected at lowering time). The remaining operators apply
/// at that location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonFilter {
    pub path: Vec<String>,
    pub equals: Option<serde_json::Value>,
    pub string_contains: Option<String>,
    pub array_contains: Option<serde_json::Value>,
}

impl JsonFilter {
    pub fn at(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn equals(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.equals = Some(value.into());
        self
    }

    pub fn string_contains(mut self, value: impl Into<String>) -> Self {
        self.string_contains = Some(value.into());
        self
    }

    pub fn array_contains(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.array_contains = Some(value.into());
        self
    }
}
