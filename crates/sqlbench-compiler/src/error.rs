//! Error types for registry construction and statement compilation.

use crate::registry::GeneratorKey;
use sqlbench_generator::GeneratorError;
use thiserror::Error;

/// Errors raised while building the generator registry.
///
/// These are configuration failures: they surface before any statement
/// is compiled or executed.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two declared parameters resolved to the same key
    #[error("duplicate generator for {0}")]
    DuplicateGenerator(GeneratorKey),

    /// A parameter's generation rule failed validation
    #[error("invalid generation rule for {key}: {source}")]
    Rule {
        key: GeneratorKey,
        #[source]
        source: GeneratorError,
    },
}

/// Errors raised while compiling one workload unit.
///
/// Compilation errors abort the owning unit with no statements emitted;
/// they are typed results, never panics, even when they indicate a
/// contract violation by the caller.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A declared parameter has no registered generator
    #[error("no generator for parameter {param}")]
    MissingGenerator { param: String },

    /// A generator failed to produce its next value
    #[error("failed to generate value for parameter {param}: {source}")]
    Generation {
        param: String,
        #[source]
        source: GeneratorError,
    },

    /// The SQL text still contains a `${...}` token after substitution
    #[error("placeholder ${{{placeholder}}} has no declared parameter")]
    UnboundPlaceholder { placeholder: String },

    /// Compilation was cancelled before completing
    #[error("compilation cancelled")]
    Cancelled,
}
