//! Numeric value generators.

use crate::generator::GeneratorError;
use rand::Rng;
use sqlbench_core::Value;

/// Produce the sequential value for the given invocation index.
///
/// Overflow past `i64::MAX` is a generation error, not a wraparound.
pub fn generate_sequential(start: i64, index: u64) -> Result<Value, GeneratorError> {
    let offset = i64::try_from(index).map_err(|_| GeneratorError::SequenceOverflow)?;
    let value = start
        .checked_add(offset)
        .ok_or(GeneratorError::SequenceOverflow)?;
    Ok(Value::Int64(value))
}

/// Generate a random decimal in the given range.
///
/// The decimal is formatted with `scale` fractional digits and carried
/// as a string until the execution boundary parses it.
pub fn generate_decimal_range<R: Rng>(rng: &mut R, min: f64, max: f64, scale: u8) -> Value {
    let value = rng.gen_range(min..=max);
    Value::decimal(format!("{value:.prec$}", prec = scale as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_sequential() {
        assert_eq!(generate_sequential(5, 0).unwrap(), Value::Int64(5));
        assert_eq!(generate_sequential(5, 10).unwrap(), Value::Int64(15));
        assert_eq!(generate_sequential(-5, 3).unwrap(), Value::Int64(-2));
    }

    #[test]
    fn test_generate_sequential_overflow() {
        assert!(matches!(
            generate_sequential(i64::MAX, 1),
            Err(GeneratorError::SequenceOverflow)
        ));
    }

    #[test]
    fn test_generate_decimal_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_decimal_range(&mut rng, 0.0, 100.0, 2);
            if let Value::Decimal { value } = value {
                let parsed: f64 = value.parse().unwrap();
                assert!((0.0..=100.0).contains(&parsed));
                let fraction = value.split('.').nth(1).unwrap();
                assert_eq!(fraction.len(), 2);
            } else {
                panic!("Expected Decimal value");
            }
        }
    }

    #[test]
    fn test_generate_decimal_range_scale_zero() {
        let mut rng = StdRng::seed_from_u64(42);

        let value = generate_decimal_range(&mut rng, 10.0, 20.0, 0);
        if let Value::Decimal { value } = value {
            assert!(!value.contains('.'));
        } else {
            panic!("Expected Decimal value");
        }
    }
}
