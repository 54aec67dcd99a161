//! Core types for the sqlbench workload compiler.
//!
//! This crate provides the vocabulary shared by the compiler and the
//! database drivers:
//!
//! - [`BenchmarkDescriptor`] - The decoded benchmark tree (steps → units)
//! - [`WorkloadUnit`] - One schema-creation, query, or transaction descriptor
//! - [`GenerationRule`] - Declarative rules for deterministic value generation
//! - [`Value`] - Backend-agnostic generated values
//! - [`CompiledStatement`] / [`CompiledBatch`] - Ready-to-execute output
//!
//! # Architecture
//!
//! ```text
//! sqlbench-core (this crate)
//!    │
//!    ├─── sqlbench-generator  (turns GenerationRule into values)
//!    ├─── sqlbench-compiler   (turns descriptors into compiled batches)
//!    └─── sqlbench-postgres   (binds Value to PostgreSQL and executes)
//! ```
//!
//! Values carry no SQL-dialect knowledge; translation to a backend-native
//! representation happens in the driver crates.

pub mod batch;
pub mod descriptor;
pub mod rule;
pub mod value;

// Re-exports for convenience
pub use batch::{CompiledBatch, CompiledStatement, IsolationLevel};
pub use descriptor::{
    BenchmarkDescriptor, ColumnDescriptor, DescriptorError, IndexDescriptor, ParamDescriptor,
    QueryDescriptor, StepDescriptor, TableDescriptor, TransactionDescriptor, WorkloadUnit,
};
pub use rule::GenerationRule;
pub use value::Value;
