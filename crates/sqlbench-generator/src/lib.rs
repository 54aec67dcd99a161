//! Deterministic value generators for the sqlbench workload compiler.
//!
//! This crate turns a declarative [`GenerationRule`] into a
//! [`ValueGenerator`]: a stateful producer of one [`Value`] per
//! invocation, seeded from the run seed so the same
//! `(seed, count, rule)` triple yields the same value sequence on every
//! run.
//!
//! # Example
//!
//! ```rust
//! use sqlbench_core::GenerationRule;
//! use sqlbench_generator::ValueGenerator;
//!
//! let rule = GenerationRule::IntRange { min: 1, max: 100 };
//! let mut a = ValueGenerator::new(42, 10, &rule).unwrap();
//! let mut b = ValueGenerator::new(42, 10, &rule).unwrap();
//! assert_eq!(a.next_value().unwrap(), b.next_value().unwrap());
//! ```
//!
//! Rules are validated eagerly: a malformed rule (inverted range, empty
//! choice list, unparseable timestamp bound) fails at construction, not
//! on the first draw.
//!
//! [`GenerationRule`]: sqlbench_core::GenerationRule
//! [`Value`]: sqlbench_core::Value

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{GeneratorError, ValueGenerator};
