//! Individual value generators for different data types.
//!
//! Each submodule holds the sampling logic for one family of rules;
//! [`sample`] dispatches a validated rule to the right one.

pub mod numeric;
pub mod pattern;
pub mod static_value;
pub mod timestamp;
pub mod uuid;

use crate::generator::{CompiledRule, GeneratorError};
use rand::Rng;
use sqlbench_core::Value;

/// Draw one value for a validated rule.
pub(crate) fn sample<R: Rng>(
    rule: &CompiledRule,
    rng: &mut R,
    index: u64,
) -> Result<Value, GeneratorError> {
    let value = match rule {
        CompiledRule::UuidV4 => uuid::generate_uuid_v4(rng),

        CompiledRule::Sequential { start } => numeric::generate_sequential(*start, index)?,

        CompiledRule::Int32Range { min, max } => Value::Int32(rng.gen_range(*min..=*max)),
        CompiledRule::IntRange { min, max } => Value::Int64(rng.gen_range(*min..=*max)),
        CompiledRule::Uint32Range { min, max } => Value::Uint32(rng.gen_range(*min..=*max)),
        CompiledRule::Uint64Range { min, max } => Value::Uint64(rng.gen_range(*min..=*max)),
        CompiledRule::Float32Range { min, max } => Value::Float32(rng.gen_range(*min..=*max)),
        CompiledRule::FloatRange { min, max } => Value::Float64(rng.gen_range(*min..=*max)),

        CompiledRule::DecimalRange { min, max, scale } => {
            numeric::generate_decimal_range(rng, *min, *max, *scale)
        }

        CompiledRule::Pattern { pattern } => pattern::generate_pattern(pattern, rng, index),

        CompiledRule::TimestampRange {
            start_secs,
            end_secs,
        } => timestamp::generate_timestamp_range(rng, *start_secs, *end_secs),

        CompiledRule::WeightedBool { true_weight } => Value::Bool(rng.gen_bool(*true_weight)),

        CompiledRule::OneOf { values } => {
            let idx = rng.gen_range(0..values.len());
            values[idx].clone()
        }

        CompiledRule::Static { value } => value.clone(),

        CompiledRule::Null => Value::Null,
    };

    Ok(value)
}
