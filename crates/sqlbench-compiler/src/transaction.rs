//! Transaction translator: query groups to isolation-scoped batches.

use crate::error::CompileError;
use crate::query::compile_query;
use crate::registry::GeneratorRegistry;
use sqlbench_core::{CompiledBatch, TransactionDescriptor};

/// Compile a transaction descriptor into one indivisible batch.
///
/// Inner queries are compiled in declared order and their statements
/// concatenated; the transaction's isolation level becomes the batch
/// directive. No `BEGIN`/`COMMIT` text is emitted here - framing is the
/// executor's responsibility, which keeps the compiled output
/// backend-agnostic. The first inner-query failure aborts the whole
/// transaction with no statements emitted.
pub fn compile_transaction(
    registry: &GeneratorRegistry,
    step: &str,
    tx: &TransactionDescriptor,
) -> Result<CompiledBatch, CompileError> {
    tracing::debug!(step, transaction = %tx.name, queries = tx.queries.len(), "build transaction");

    let mut statements = Vec::new();

    for query in &tx.queries {
        let batch = compile_query(registry, step, query)?;
        statements.extend(batch.statements);
    }

    Ok(CompiledBatch::isolated(statements, tx.isolation))
}
