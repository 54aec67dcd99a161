//! Batch execution: direct or inside an isolation-scoped transaction.

use crate::config::{PoolOptions, StatementMode};
use crate::error::ExecuteError;
use crate::isolation;
use crate::pool::PgPool;
use crate::values::bind_value;
use sqlbench_core::{CompiledBatch, CompiledStatement, IsolationLevel};
use std::collections::HashMap;
use tokio_postgres::types::ToSql;
use tokio_postgres::{GenericClient, Statement, Transaction};
use tracing::{debug, warn};

/// Execution tuning derived from the pool options.
#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    pub statement_mode: StatementMode,
    pub statement_cache_capacity: usize,
    pub trace_statements: bool,
}

impl From<&PoolOptions> for ExecutorOptions {
    fn from(options: &PoolOptions) -> Self {
        Self {
            statement_mode: options.statement_mode,
            statement_cache_capacity: options.statement_cache_capacity,
            trace_statements: options.trace_statements,
        }
    }
}

/// A transaction the caller already holds open.
///
/// Passed explicitly instead of being discovered from ambient state, so
/// "is there a transaction in scope" is always answerable from the call
/// chain alone.
pub struct AmbientTransaction<'a> {
    /// The open transaction statements are executed on
    pub transaction: &'a Transaction<'a>,

    /// The isolation level it was started with, if known
    pub isolation: Option<IsolationLevel>,
}

/// Executes compiled batches against the shared pool.
pub struct Executor {
    pool: PgPool,
    options: ExecutorOptions,
}

impl Executor {
    /// Create an executor over a connected pool.
    pub fn new(pool: PgPool, options: ExecutorOptions) -> Self {
        Self { pool, options }
    }

    /// Run one batch.
    ///
    /// Without an isolation directive each statement executes directly
    /// against a pooled connection, in order; the first failure aborts
    /// the rest and is returned, with no retry. With a directive the
    /// whole batch runs inside one transaction at that level: commit on
    /// success, rollback on the first failure.
    pub async fn run(&self, batch: &CompiledBatch) -> Result<(), ExecuteError> {
        match batch.isolation {
            None => self.run_direct(batch).await,
            Some(level) => self.run_isolated(batch, level).await,
        }
    }

    /// Run one batch on a transaction the caller already holds open.
    ///
    /// The ambient transaction is reused; no second transaction is
    /// opened. A batch that requests a different isolation level than
    /// the ambient one is rejected before any of its statements run.
    pub async fn run_in(
        &self,
        batch: &CompiledBatch,
        ambient: &AmbientTransaction<'_>,
    ) -> Result<(), ExecuteError> {
        if let Some(requested) = batch.isolation {
            if ambient.isolation != Some(requested) {
                return Err(ExecuteError::IsolationMismatch {
                    requested,
                    ambient: ambient.isolation,
                });
            }
        }

        let mut cache = StatementCache::new(&self.options);
        for statement in &batch.statements {
            self.execute_statement(ambient.transaction, statement, &mut cache)
                .await?;
        }

        Ok(())
    }

    async fn run_direct(&self, batch: &CompiledBatch) -> Result<(), ExecuteError> {
        let conn = self.pool.get().await?;

        let mut cache = StatementCache::new(&self.options);
        for statement in &batch.statements {
            self.execute_statement(&*conn, statement, &mut cache).await?;
        }

        Ok(())
    }

    async fn run_isolated(
        &self,
        batch: &CompiledBatch,
        level: IsolationLevel,
    ) -> Result<(), ExecuteError> {
        let mut conn = self.pool.get().await?;

        let tx = conn
            .build_transaction()
            .isolation_level(isolation::to_postgres(level))
            .start()
            .await?;

        let mut cache = StatementCache::new(&self.options);
        for statement in &batch.statements {
            if let Err(err) = self.execute_statement(&tx, statement, &mut cache).await {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                return Err(err);
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn execute_statement<C: GenericClient>(
        &self,
        client: &C,
        statement: &CompiledStatement,
        cache: &mut StatementCache,
    ) -> Result<u64, ExecuteError> {
        let params = bind_statement_params(statement)?;
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        if self.options.trace_statements {
            debug!(
                name = %statement.name,
                sql = %statement.sql,
                params = params.len(),
                "execute statement"
            );
        }

        let rows = match cache.prepared(client, &statement.sql).await? {
            Some(prepared) => client.execute(&prepared, &param_refs).await?,
            None => client.execute(statement.sql.as_str(), &param_refs).await?,
        };

        Ok(rows)
    }
}

fn bind_statement_params(
    statement: &CompiledStatement,
) -> Result<Vec<Box<dyn ToSql + Sync + Send>>, ExecuteError> {
    statement
        .values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            bind_value(value).map_err(|err| ExecuteError::Bind {
                statement: statement.name.clone(),
                index: index + 1,
                reason: err.to_string(),
            })
        })
        .collect()
}

/// Per-batch prepared-statement cache.
///
/// Prepared handles are scoped to one connection, and every batch runs
/// on exactly one connection, so the cache lives for one batch. Repeated
/// statements in a batch share their SQL text, which is what makes this
/// worthwhile.
struct StatementCache {
    enabled: bool,
    capacity: usize,
    statements: HashMap<String, Statement>,
}

impl StatementCache {
    fn new(options: &ExecutorOptions) -> Self {
        Self {
            enabled: options.statement_mode == StatementMode::CacheStatement,
            capacity: options.statement_cache_capacity,
            statements: HashMap::new(),
        }
    }

    /// Prepare (or fetch) the handle for one SQL text; `None` when
    /// caching is disabled. Texts beyond capacity are executed
    /// unprepared rather than evicting earlier entries.
    async fn prepared<C: GenericClient>(
        &mut self,
        client: &C,
        sql: &str,
    ) -> Result<Option<Statement>, tokio_postgres::Error> {
        if !self.enabled {
            return Ok(None);
        }

        if let Some(statement) = self.statements.get(sql) {
            return Ok(Some(statement.clone()));
        }

        if self.statements.len() >= self.capacity {
            return Ok(None);
        }

        let statement = client.prepare(sql).await?;
        self.statements.insert(sql.to_string(), statement.clone());
        Ok(Some(statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbench_core::Value;

    fn options(mode: StatementMode) -> ExecutorOptions {
        ExecutorOptions {
            statement_mode: mode,
            statement_cache_capacity: 2,
            trace_statements: false,
        }
    }

    #[test]
    fn test_cache_disabled_in_exec_mode() {
        let cache = StatementCache::new(&options(StatementMode::Exec));
        assert!(!cache.enabled);
    }

    #[test]
    fn test_bind_statement_params_reports_position() {
        let statement = CompiledStatement {
            name: "q1".to_string(),
            sql: "SELECT $1, $2".to_string(),
            values: vec![Value::Int32(1), Value::decimal("boom")],
        };

        let err = bind_statement_params(&statement).unwrap_err();
        match err {
            ExecuteError::Bind {
                statement, index, ..
            } => {
                assert_eq!(statement, "q1");
                assert_eq!(index, 2);
            }
            other => panic!("expected Bind error, got {other:?}"),
        }
    }
}
