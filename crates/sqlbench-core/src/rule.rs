//! Declarative generation rules for query parameters.
//!
//! Each declared query parameter carries one [`GenerationRule`]; the
//! generator crate turns a rule into a deterministic value stream. Rules
//! are plain data so they can be decoded straight from a benchmark
//! descriptor file.

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

fn default_scale() -> u8 {
    2
}

/// Generation rule for one query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationRule {
    /// Reproducible UUID v4 drawn from the seeded RNG
    UuidV4,

    /// Sequential 64-bit integers starting at `start`
    Sequential {
        #[serde(default)]
        start: i64,
    },

    /// Random 32-bit signed integer in `[min, max]`
    Int32Range { min: i32, max: i32 },

    /// Random 64-bit signed integer in `[min, max]`
    IntRange { min: i64, max: i64 },

    /// Random 32-bit unsigned integer in `[min, max]`
    Uint32Range { min: u32, max: u32 },

    /// Random 64-bit unsigned integer in `[min, max]`
    Uint64Range { min: u64, max: u64 },

    /// Random 32-bit float in `[min, max]`
    Float32Range { min: f32, max: f32 },

    /// Random 64-bit float in `[min, max]`
    FloatRange { min: f64, max: f64 },

    /// Random decimal in `[min, max]` with `scale` fractional digits
    DecimalRange {
        min: f64,
        max: f64,
        #[serde(default = "default_scale")]
        scale: u8,
    },

    /// Pattern string with `{index}`, `{uuid}` and `{rand:N}` placeholders
    Pattern { pattern: String },

    /// Random timestamp between two RFC 3339 (or `YYYY-MM-DD`) bounds
    TimestampRange { start: String, end: String },

    /// Boolean with the given probability of `true`
    WeightedBool { true_weight: f64 },

    /// Random selection from a fixed list
    OneOf { values: Vec<YamlValue> },

    /// The same value on every invocation
    Static { value: YamlValue },

    /// Always null
    Null,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_from_yaml() {
        let rule: GenerationRule = serde_yaml::from_str(
            r#"
type: int_range
min: 1
max: 100
"#,
        )
        .unwrap();
        assert_eq!(rule, GenerationRule::IntRange { min: 1, max: 100 });
    }

    #[test]
    fn test_decimal_scale_default() {
        let rule: GenerationRule = serde_yaml::from_str(
            r#"
type: decimal_range
min: 0.0
max: 10.0
"#,
        )
        .unwrap();
        assert_eq!(
            rule,
            GenerationRule::DecimalRange {
                min: 0.0,
                max: 10.0,
                scale: 2
            }
        );
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let result: Result<GenerationRule, _> = serde_yaml::from_str("type: fibonacci");
        assert!(result.is_err());
    }
}
