//! PostgreSQL driver for the sqlbench workload compiler.
//!
//! This crate is the execution half of sqlbench: it owns the connection
//! pool, translates [`Value`]s into PostgreSQL parameter types, and runs
//! compiled batches either statement by statement or inside an
//! isolation-scoped transaction.
//!
//! The plugin surface is the [`Driver`] trait: the host calls
//! `initialize` once with the run configuration (seed, benchmark tree,
//! pool tuning), then `compile`/`run` per workload unit, and finally
//! `teardown`.
//!
//! # Example
//!
//! ```ignore
//! use sqlbench_postgres::{Driver, PostgresDriver, RunConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let mut driver = PostgresDriver::new();
//! driver.initialize(&run_config).await?;
//!
//! for step in &run_config.benchmark.steps {
//!     for unit in &step.units {
//!         let batches = driver
//!             .compile(&step.name, unit, CancellationToken::new())
//!             .await?;
//!         for batch in &batches {
//!             driver.run(batch).await?;
//!         }
//!     }
//! }
//!
//! driver.teardown().await?;
//! ```
//!
//! [`Value`]: sqlbench_core::Value

pub mod config;
pub mod driver;
pub mod error;
pub mod executor;
pub mod isolation;
pub mod pool;
pub mod values;

// Re-exports for convenience
pub use config::{DriverConfig, PoolOptions, RunConfig, StatementMode};
pub use driver::{Driver, PostgresDriver};
pub use error::{ConfigError, DriverError, ExecuteError};
pub use executor::{AmbientTransaction, Executor, ExecutorOptions};
pub use pool::PgPool;

// Compiler-side types that appear in the driver's public API
pub use sqlbench_compiler::{BatchStream, CompileError, GeneratorRegistry, StatementCompiler};
pub use sqlbench_core::{CompiledBatch, CompiledStatement, IsolationLevel, Value, WorkloadUnit};
