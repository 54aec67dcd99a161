//! The plugin surface and its PostgreSQL implementation.

use crate::config::RunConfig;
use crate::error::DriverError;
use crate::executor::{Executor, ExecutorOptions};
use crate::pool::connect_pool;
use async_trait::async_trait;
use sqlbench_compiler::{BatchStream, GeneratorRegistry, StatementCompiler};
use sqlbench_core::{CompiledBatch, WorkloadUnit};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The driver lifecycle a benchmark host works against.
///
/// `initialize` is called once per run with the seed, the benchmark
/// tree, and pool tuning; `compile` and `run` are called per workload
/// unit; `teardown` releases the pool.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Build the generator registry and acquire the connection pool.
    async fn initialize(&mut self, config: &RunConfig) -> Result<(), DriverError>;

    /// Compile one unit into its ordered list of batches.
    async fn compile(
        &self,
        step: &str,
        unit: &WorkloadUnit,
        cancel: CancellationToken,
    ) -> Result<Vec<CompiledBatch>, DriverError>;

    /// Compile one unit, streaming batches as they are produced.
    fn compile_stream(
        &self,
        step: &str,
        unit: &WorkloadUnit,
        cancel: CancellationToken,
    ) -> Result<BatchStream, DriverError>;

    /// Execute one compiled batch.
    async fn run(&self, batch: &CompiledBatch) -> Result<(), DriverError>;

    /// Release the connection pool.
    async fn teardown(&mut self) -> Result<(), DriverError>;
}

struct DriverState {
    compiler: StatementCompiler,
    executor: Executor,
}

/// PostgreSQL implementation of the [`Driver`] plugin surface.
#[derive(Default)]
pub struct PostgresDriver {
    state: Option<DriverState>,
}

impl PostgresDriver {
    /// Create an uninitialized driver.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<&DriverState, DriverError> {
        self.state.as_ref().ok_or(DriverError::NotInitialized)
    }
}

#[async_trait]
impl Driver for PostgresDriver {
    async fn initialize(&mut self, config: &RunConfig) -> Result<(), DriverError> {
        let options = config.driver.parse()?;
        let pool = connect_pool(&options).await?;

        let registry = Arc::new(GeneratorRegistry::build(config.seed, &config.benchmark)?);
        info!(
            seed = config.seed,
            generators = registry.len(),
            "driver initialized"
        );

        self.state = Some(DriverState {
            compiler: StatementCompiler::new(registry),
            executor: Executor::new(pool, ExecutorOptions::from(&options)),
        });

        Ok(())
    }

    async fn compile(
        &self,
        step: &str,
        unit: &WorkloadUnit,
        cancel: CancellationToken,
    ) -> Result<Vec<CompiledBatch>, DriverError> {
        let state = self.state()?;
        Ok(state.compiler.compile_unit(step, unit, cancel).await?)
    }

    fn compile_stream(
        &self,
        step: &str,
        unit: &WorkloadUnit,
        cancel: CancellationToken,
    ) -> Result<BatchStream, DriverError> {
        let state = self.state()?;
        Ok(state.compiler.compile_unit_stream(step, unit, cancel))
    }

    async fn run(&self, batch: &CompiledBatch) -> Result<(), DriverError> {
        let state = self.state()?;
        Ok(state.executor.run(batch).await?)
    }

    async fn teardown(&mut self) -> Result<(), DriverError> {
        // Dropping the state drops the pool, closing its connections.
        if self.state.take().is_some() {
            info!("driver torn down");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbench_core::BenchmarkDescriptor;

    #[tokio::test]
    async fn test_uninitialized_driver_returns_typed_error() {
        let driver = PostgresDriver::new();
        let unit = WorkloadUnit::Table(sqlbench_core::TableDescriptor {
            name: "t".to_string(),
            columns: vec![],
            indexes: vec![],
        });

        let err = driver
            .compile("step", &unit, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::NotInitialized));

        let err = driver
            .run(&CompiledBatch::plain(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::NotInitialized));
    }

    #[tokio::test]
    async fn test_teardown_without_initialize_is_a_noop() {
        let mut driver = PostgresDriver::new();
        assert!(driver.teardown().await.is_ok());
    }

    #[tokio::test]
    async fn test_initialize_rejects_bad_config_before_connecting() {
        let mut driver = PostgresDriver::new();
        let config = RunConfig {
            seed: 42,
            benchmark: BenchmarkDescriptor { steps: vec![] },
            driver: crate::config::DriverConfig {
                url: "postgres://localhost/bench".to_string(),
                trace_log_level: None,
                max_conns: None,
                min_conns: None,
                max_conn_lifetime: Some("soon".to_string()),
                max_conn_idle_time: None,
                statement_mode: crate::config::StatementMode::Exec,
                statement_cache_capacity: None,
            },
        };

        let err = driver.initialize(&config).await.unwrap_err();
        assert!(matches!(err, DriverError::Config(_)));
    }
}
