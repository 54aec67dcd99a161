//! The deterministic value generator.

use crate::generators::{static_value, timestamp};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlbench_core::{GenerationRule, Value};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Range bounds are inverted or empty
    #[error("empty range: min {min} exceeds max {max}")]
    InvalidRange { min: String, max: String },

    /// Boolean weight outside [0, 1]
    #[error("weight {0} is outside [0, 1]")]
    InvalidWeight(f64),

    /// one_of rule with an empty value list
    #[error("one_of requires at least one value")]
    EmptyChoice,

    /// Timestamp bound that is neither RFC 3339 nor YYYY-MM-DD
    #[error("invalid timestamp bound: {0}")]
    InvalidTimestamp(String),

    /// Sequential counter ran past i64::MAX
    #[error("sequential value overflowed i64")]
    SequenceOverflow,
}

/// Validated, ready-to-sample form of a [`GenerationRule`].
///
/// Timestamp bounds are parsed and choice lists converted once at
/// construction so sampling never re-validates the rule.
#[derive(Debug, Clone)]
pub(crate) enum CompiledRule {
    UuidV4,
    Sequential { start: i64 },
    Int32Range { min: i32, max: i32 },
    IntRange { min: i64, max: i64 },
    Uint32Range { min: u32, max: u32 },
    Uint64Range { min: u64, max: u64 },
    Float32Range { min: f32, max: f32 },
    FloatRange { min: f64, max: f64 },
    DecimalRange { min: f64, max: f64, scale: u8 },
    Pattern { pattern: String },
    TimestampRange { start_secs: i64, end_secs: i64 },
    WeightedBool { true_weight: f64 },
    OneOf { values: Vec<Value> },
    Static { value: Value },
    Null,
}

/// Mixing constant for deriving a generator seed from the run seed and
/// the repetition count (golden-ratio increment, as used for RNG stream
/// splitting).
const SEED_MIX: u64 = 0x9E3779B97F4A7C15;

fn mix_seed(seed: u64, count: u64) -> u64 {
    seed.wrapping_add(count.wrapping_mul(SEED_MIX))
}

macro_rules! checked_range {
    ($variant:ident, $min:expr, $max:expr) => {{
        if $min > $max {
            return Err(GeneratorError::InvalidRange {
                min: $min.to_string(),
                max: $max.to_string(),
            });
        }
        CompiledRule::$variant {
            min: $min,
            max: $max,
        }
    }};
}

fn compile_rule(rule: &GenerationRule) -> Result<CompiledRule, GeneratorError> {
    let compiled = match rule {
        GenerationRule::UuidV4 => CompiledRule::UuidV4,

        GenerationRule::Sequential { start } => CompiledRule::Sequential { start: *start },

        GenerationRule::Int32Range { min, max } => checked_range!(Int32Range, *min, *max),
        GenerationRule::IntRange { min, max } => checked_range!(IntRange, *min, *max),
        GenerationRule::Uint32Range { min, max } => checked_range!(Uint32Range, *min, *max),
        GenerationRule::Uint64Range { min, max } => checked_range!(Uint64Range, *min, *max),
        GenerationRule::Float32Range { min, max } => checked_range!(Float32Range, *min, *max),
        GenerationRule::FloatRange { min, max } => checked_range!(FloatRange, *min, *max),

        GenerationRule::DecimalRange { min, max, scale } => {
            if min > max {
                return Err(GeneratorError::InvalidRange {
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
            CompiledRule::DecimalRange {
                min: *min,
                max: *max,
                scale: *scale,
            }
        }

        GenerationRule::Pattern { pattern } => CompiledRule::Pattern {
            pattern: pattern.clone(),
        },

        GenerationRule::TimestampRange { start, end } => {
            let start_secs = timestamp::parse_timestamp(start)
                .ok_or_else(|| GeneratorError::InvalidTimestamp(start.clone()))?
                .timestamp();
            let end_secs = timestamp::parse_timestamp(end)
                .ok_or_else(|| GeneratorError::InvalidTimestamp(end.clone()))?
                .timestamp();
            if start_secs > end_secs {
                return Err(GeneratorError::InvalidRange {
                    min: start.clone(),
                    max: end.clone(),
                });
            }
            CompiledRule::TimestampRange {
                start_secs,
                end_secs,
            }
        }

        GenerationRule::WeightedBool { true_weight } => {
            if !(0.0..=1.0).contains(true_weight) {
                return Err(GeneratorError::InvalidWeight(*true_weight));
            }
            CompiledRule::WeightedBool {
                true_weight: *true_weight,
            }
        }

        GenerationRule::OneOf { values } => {
            if values.is_empty() {
                return Err(GeneratorError::EmptyChoice);
            }
            CompiledRule::OneOf {
                values: values.iter().map(static_value::yaml_to_value).collect(),
            }
        }

        GenerationRule::Static { value } => CompiledRule::Static {
            value: static_value::yaml_to_value(value),
        },

        GenerationRule::Null => CompiledRule::Null,
    };

    Ok(compiled)
}

/// Stateful, deterministic producer of one value per invocation.
///
/// Seeded from the run seed and the owning query's repetition count, so
/// every run with the same seed and benchmark tree draws identical value
/// sequences.
#[derive(Debug)]
pub struct ValueGenerator {
    /// Validated rule
    rule: CompiledRule,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Invocation index (drives `sequential` and pattern `{index}`)
    index: u64,
}

impl ValueGenerator {
    /// Build a generator, validating the rule eagerly.
    pub fn new(seed: u64, count: u64, rule: &GenerationRule) -> Result<Self, GeneratorError> {
        Ok(Self {
            rule: compile_rule(rule)?,
            rng: StdRng::seed_from_u64(mix_seed(seed, count)),
            index: 0,
        })
    }

    /// Current invocation index.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Produce the next value.
    pub fn next_value(&mut self) -> Result<Value, GeneratorError> {
        let index = self.index;
        let value = crate::generators::sample(&self.rule, &mut self.rng, index)?;
        self.index += 1;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(generator: &mut ValueGenerator, n: usize) -> Vec<Value> {
        (0..n).map(|_| generator.next_value().unwrap()).collect()
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let rule = GenerationRule::IntRange { min: 0, max: 1000 };
        let mut a = ValueGenerator::new(42, 10, &rule).unwrap();
        let mut b = ValueGenerator::new(42, 10, &rule).unwrap();

        assert_eq!(drain(&mut a, 50), drain(&mut b, 50));
    }

    #[test]
    fn test_different_seed_different_sequence() {
        let rule = GenerationRule::IntRange { min: 0, max: 1000 };
        let mut a = ValueGenerator::new(42, 10, &rule).unwrap();
        let mut b = ValueGenerator::new(43, 10, &rule).unwrap();

        assert_ne!(drain(&mut a, 50), drain(&mut b, 50));
    }

    #[test]
    fn test_count_is_part_of_the_seed() {
        let rule = GenerationRule::FloatRange { min: 0.0, max: 1.0 };
        let mut a = ValueGenerator::new(42, 10, &rule).unwrap();
        let mut b = ValueGenerator::new(42, 20, &rule).unwrap();

        assert_ne!(drain(&mut a, 20), drain(&mut b, 20));
    }

    #[test]
    fn test_sequential_counts_from_start() {
        let rule = GenerationRule::Sequential { start: 100 };
        let mut generator = ValueGenerator::new(1, 3, &rule).unwrap();

        assert_eq!(generator.next_value().unwrap(), Value::Int64(100));
        assert_eq!(generator.next_value().unwrap(), Value::Int64(101));
        assert_eq!(generator.next_value().unwrap(), Value::Int64(102));
    }

    #[test]
    fn test_inverted_range_fails_fast() {
        let rule = GenerationRule::IntRange { min: 10, max: 1 };
        assert!(matches!(
            ValueGenerator::new(42, 1, &rule),
            Err(GeneratorError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_empty_one_of_fails_fast() {
        let rule = GenerationRule::OneOf { values: vec![] };
        assert!(matches!(
            ValueGenerator::new(42, 1, &rule),
            Err(GeneratorError::EmptyChoice)
        ));
    }

    #[test]
    fn test_invalid_weight_fails_fast() {
        let rule = GenerationRule::WeightedBool { true_weight: 1.5 };
        assert!(matches!(
            ValueGenerator::new(42, 1, &rule),
            Err(GeneratorError::InvalidWeight(_))
        ));
    }

    #[test]
    fn test_invalid_timestamp_bound_fails_fast() {
        let rule = GenerationRule::TimestampRange {
            start: "not-a-date".to_string(),
            end: "2024-01-01".to_string(),
        };
        assert!(matches!(
            ValueGenerator::new(42, 1, &rule),
            Err(GeneratorError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_sequential_overflow_is_an_error() {
        let rule = GenerationRule::Sequential { start: i64::MAX };
        let mut generator = ValueGenerator::new(42, 2, &rule).unwrap();

        assert_eq!(generator.next_value().unwrap(), Value::Int64(i64::MAX));
        assert!(matches!(
            generator.next_value(),
            Err(GeneratorError::SequenceOverflow)
        ));
    }
}
