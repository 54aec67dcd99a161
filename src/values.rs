//! Conversion from generated values to PostgreSQL parameters.
//!
//! This is the execution boundary: compiled values are backend-agnostic
//! until they are bound here. Binding can fail for values with no
//! PostgreSQL representation; the executor wraps those failures with the
//! owning statement and parameter position.

use rust_decimal::Decimal;
use sqlbench_core::Value;
use std::str::FromStr;
use tokio_postgres::types::ToSql;

/// One bound statement parameter.
pub type SqlParam = Box<dyn ToSql + Sync + Send>;

/// Error type for value binding.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// Decimal text that rust_decimal cannot parse
    #[error("invalid decimal \"{0}\"")]
    InvalidDecimal(String),

    /// Unsigned value too large for BIGINT
    #[error("unsigned value {0} exceeds BIGINT range")]
    Uint64OutOfRange(u64),

    /// Nested structs have no parameter representation
    #[error("struct values cannot be bound as statement parameters")]
    UnsupportedStruct,
}

/// Convert one value to a boxed ToSql trait object.
///
/// PostgreSQL has no unsigned integer types, so unsigned values are
/// widened (u32) or range-checked (u64) into BIGINT.
pub fn bind_value(value: &Value) -> Result<SqlParam, BindError> {
    let param: SqlParam = match value {
        Value::Null => Box::new(None::<String>),
        Value::Int32(i) => Box::new(*i),
        Value::Uint32(u) => Box::new(i64::from(*u)),
        Value::Int64(i) => Box::new(*i),
        Value::Uint64(u) => {
            let i = i64::try_from(*u).map_err(|_| BindError::Uint64OutOfRange(*u))?;
            Box::new(i)
        }
        Value::Float32(f) => Box::new(*f),
        Value::Float64(f) => Box::new(*f),
        Value::String(s) => Box::new(s.clone()),
        Value::Bool(b) => Box::new(*b),
        Value::Decimal { value } => {
            let decimal = Decimal::from_str(value)
                .map_err(|_| BindError::InvalidDecimal(value.clone()))?;
            Box::new(decimal)
        }
        Value::Uuid(u) => Box::new(*u),
        Value::Timestamp(ts) => Box::new(*ts),
        Value::Struct(_) => return Err(BindError::UnsupportedStruct),
    };

    Ok(param)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[test]
    fn test_bind_all_supported_types() {
        let values = [
            Value::Null,
            Value::Int32(42),
            Value::Uint32(42),
            Value::Int64(42),
            Value::Uint64(42),
            Value::Float32(3.14),
            Value::Float64(2.71),
            Value::String("abc".to_string()),
            Value::Bool(true),
            Value::decimal("1.23"),
            Value::Uuid(Uuid::nil()),
            Value::Timestamp(Utc::now()),
        ];

        for value in values {
            assert!(bind_value(&value).is_ok(), "failed to bind {value:?}");
        }
    }

    #[test]
    fn test_bind_struct_is_unsupported() {
        let value = Value::Struct(HashMap::new());
        assert!(matches!(bind_value(&value), Err(BindError::UnsupportedStruct)));
    }

    #[test]
    fn test_bind_invalid_decimal() {
        let value = Value::decimal("not-a-number");
        assert!(matches!(bind_value(&value), Err(BindError::InvalidDecimal(_))));
    }

    #[test]
    fn test_bind_uint64_overflow() {
        let value = Value::Uint64(u64::MAX);
        assert!(matches!(
            bind_value(&value),
            Err(BindError::Uint64OutOfRange(_))
        ));

        let value = Value::Uint64(i64::MAX as u64);
        assert!(bind_value(&value).is_ok());
    }
}
