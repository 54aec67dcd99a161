//! Unit dispatch and the two delivery modes.

use crate::error::CompileError;
use crate::query::{compile_invocation, compile_query, rewrite_placeholders};
use crate::registry::GeneratorRegistry;
use crate::stream::{BatchSender, BatchStream, CHANNEL_CAPACITY};
use crate::table::compile_table;
use crate::transaction::compile_transaction;
use sqlbench_core::{
    CompiledBatch, QueryDescriptor, TableDescriptor, TransactionDescriptor, WorkloadUnit,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// How a producer task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProducerExit {
    /// All batches delivered
    Completed,
    /// Terminal error delivered
    Failed,
    /// Stopped by cancellation (or the consumer went away)
    Cancelled,
}

/// Compiles workload units into statement batches.
///
/// The registry is shared read-only across all in-flight compilations;
/// the compiler itself is cheap to clone around via its `Arc`.
#[derive(Clone)]
pub struct StatementCompiler {
    registry: Arc<GeneratorRegistry>,
}

impl StatementCompiler {
    /// Create a compiler over a built registry.
    pub fn new(registry: Arc<GeneratorRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this compiler draws values from.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Compile a table descriptor into its DDL batch.
    pub fn compile_table(&self, table: &TableDescriptor) -> CompiledBatch {
        compile_table(table)
    }

    /// Compile a query descriptor into one batch of `count` statements.
    pub fn compile_query(
        &self,
        step: &str,
        query: &QueryDescriptor,
    ) -> Result<CompiledBatch, CompileError> {
        compile_query(&self.registry, step, query)
    }

    /// Compile a transaction descriptor into one indivisible batch.
    pub fn compile_transaction(
        &self,
        step: &str,
        tx: &TransactionDescriptor,
    ) -> Result<CompiledBatch, CompileError> {
        compile_transaction(&self.registry, step, tx)
    }

    /// Compile a unit, streaming batches as they are produced.
    ///
    /// Tables yield one batch; queries yield one single-statement batch
    /// per repetition; transactions yield one indivisible batch. The
    /// stream terminates after the last batch or the first error, and a
    /// cancelled token stops production before the next batch while
    /// already-enqueued batches are still delivered.
    pub fn compile_unit_stream(
        &self,
        step: &str,
        unit: &WorkloadUnit,
        cancel: CancellationToken,
    ) -> BatchStream {
        let (stream, _handle) = self.spawn_producer(step, unit, cancel);
        stream
    }

    /// Compile a unit, collecting the stream into one ordered list.
    ///
    /// The producer runs in the background but can never outlive this
    /// call: it is joined after the stream terminates, whether by
    /// completion, first error, or cancellation.
    pub async fn compile_unit(
        &self,
        step: &str,
        unit: &WorkloadUnit,
        cancel: CancellationToken,
    ) -> Result<Vec<CompiledBatch>, CompileError> {
        let (mut stream, handle) = self.spawn_producer(step, unit, cancel);

        let mut batches = Vec::new();
        let mut first_error = None;

        while let Some(item) = stream.next_batch().await {
            match item {
                Ok(batch) => batches.push(batch),
                Err(err) => {
                    first_error = Some(err);
                    break;
                }
            }
        }

        // Dropping the receiver unblocks a producer waiting for channel
        // capacity; joining it guarantees nothing keeps running after we
        // return.
        drop(stream);
        let exit = handle.await.unwrap_or(ProducerExit::Cancelled);

        if let Some(err) = first_error {
            return Err(err);
        }

        match exit {
            ProducerExit::Completed | ProducerExit::Failed => Ok(batches),
            ProducerExit::Cancelled => Err(CompileError::Cancelled),
        }
    }

    fn spawn_producer(
        &self,
        step: &str,
        unit: &WorkloadUnit,
        cancel: CancellationToken,
    ) -> (BatchStream, tokio::task::JoinHandle<ProducerExit>) {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let registry = Arc::clone(&self.registry);
        let step = step.to_string();
        let unit = unit.clone();

        let handle = tokio::spawn(produce(registry, step, unit, BatchSender::new(sender, cancel)));

        (BatchStream::new(receiver), handle)
    }
}

async fn produce(
    registry: Arc<GeneratorRegistry>,
    step: String,
    unit: WorkloadUnit,
    sender: BatchSender,
) -> ProducerExit {
    match unit {
        WorkloadUnit::Table(table) => {
            let batch = compile_table(&table);
            if sender.send(Ok(batch)).await {
                ProducerExit::Completed
            } else {
                ProducerExit::Cancelled
            }
        }

        WorkloadUnit::Query(query) => {
            let sql = match rewrite_placeholders(&query) {
                Ok(sql) => sql,
                Err(err) => {
                    sender.send(Err(err)).await;
                    return ProducerExit::Failed;
                }
            };

            for _ in 0..query.count {
                if sender.is_cancelled() {
                    return ProducerExit::Cancelled;
                }

                match compile_invocation(&registry, &step, &query, &sql) {
                    Ok(statement) => {
                        let batch = CompiledBatch::plain(vec![statement]);
                        if !sender.send(Ok(batch)).await {
                            return ProducerExit::Cancelled;
                        }
                    }
                    Err(err) => {
                        sender.send(Err(err)).await;
                        return ProducerExit::Failed;
                    }
                }
            }

            ProducerExit::Completed
        }

        WorkloadUnit::Transaction(tx) => {
            // The batch is indivisible: statements are accumulated and
            // delivered in one piece or not at all.
            let mut statements = Vec::new();

            for query in &tx.queries {
                if sender.is_cancelled() {
                    return ProducerExit::Cancelled;
                }

                match compile_query(&registry, &step, query) {
                    Ok(batch) => statements.extend(batch.statements),
                    Err(err) => {
                        sender.send(Err(err)).await;
                        return ProducerExit::Failed;
                    }
                }
            }

            let batch = CompiledBatch::isolated(statements, tx.isolation);
            if sender.send(Ok(batch)).await {
                ProducerExit::Completed
            } else {
                ProducerExit::Cancelled
            }
        }
    }
}
