//! Backend-agnostic generated values.
//!
//! [`Value`] is the tagged union produced by value generators and bound to
//! compiled statements. It deliberately knows nothing about SQL: drivers
//! convert it to their native parameter types at the execution boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One generated parameter value.
///
/// Decimals are held as strings so the compiler stays free of any fixed
/// precision; drivers parse them into their native decimal type when
/// binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// SQL NULL
    Null,

    /// 32-bit signed integer
    Int32(i32),

    /// 32-bit unsigned integer
    Uint32(u32),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit unsigned integer
    Uint64(u64),

    /// 32-bit floating point
    Float32(f32),

    /// 64-bit floating point
    Float64(f64),

    /// String value
    String(String),

    /// Boolean value
    Bool(bool),

    /// Arbitrary-precision decimal, held as its string representation
    Decimal { value: String },

    /// UUID value
    Uuid(Uuid),

    /// Date/time with timezone
    Timestamp(DateTime<Utc>),

    /// Nested struct of named values
    Struct(HashMap<String, Value>),
}

impl Value {
    /// Create a new decimal value.
    pub fn decimal(value: impl Into<String>) -> Self {
        Self::Decimal {
            value: value.into(),
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an i64, widening from narrower integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::Int32(i) => Some(i64::from(*i)),
            Self::Uint32(u) => Some(i64::from(*u)),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            Self::Float32(f) => Some(f64::from(*f)),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UUID.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Try to get this value as a timestamp.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}
