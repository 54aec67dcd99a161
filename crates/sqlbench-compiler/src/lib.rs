//! Descriptor-to-statement compiler for sqlbench workloads.
//!
//! This crate turns decoded workload descriptors into executable
//! statement batches:
//!
//! - [`GeneratorRegistry`] - one deterministic value generator per
//!   declared query parameter, built once per run
//! - [`StatementCompiler`] - dispatches a [`WorkloadUnit`] to the table,
//!   query, or transaction translator
//! - [`BatchStream`] - cancellable producer/consumer channel delivering
//!   compiled batches lazily or collected into a list
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sqlbench_compiler::{GeneratorRegistry, StatementCompiler};
//! use sqlbench_core::BenchmarkDescriptor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let benchmark = BenchmarkDescriptor::from_yaml(r#"
//! steps:
//!   - name: load
//!     units:
//!       - query:
//!           name: insert_row
//!           sql: "INSERT INTO t (id) VALUES (${id})"
//!           count: 10
//!           params:
//!             - name: id
//!               generator:
//!                 type: sequential
//! "#)?;
//!
//! let registry = Arc::new(GeneratorRegistry::build(42, &benchmark)?);
//! let compiler = StatementCompiler::new(registry);
//! # Ok(())
//! # }
//! ```
//!
//! [`WorkloadUnit`]: sqlbench_core::WorkloadUnit

pub mod compiler;
pub mod error;
pub mod query;
pub mod registry;
pub mod stream;
pub mod table;
pub mod transaction;

// Re-exports for convenience
pub use compiler::StatementCompiler;
pub use error::{CompileError, RegistryError};
pub use registry::{GeneratorKey, GeneratorRegistry};
pub use stream::BatchStream;
