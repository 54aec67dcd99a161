//! Query translator: parameterized SQL templates to compiled statements.

use crate::error::CompileError;
use crate::registry::{GeneratorKey, GeneratorRegistry};
use sqlbench_core::{CompiledBatch, CompiledStatement, QueryDescriptor, Value};
use sqlbench_generator::ValueGenerator;
use std::sync::Mutex;

/// Rewrite `${name}` placeholders to 1-based positional markers in
/// parameter declaration order.
///
/// This is a literal token substitution, not a parsed rewrite: the full
/// `${name}` token including the closing brace is replaced, and a
/// parameter token that is a strict substring of another token's text
/// would be substituted first. Returns an error if any `${...}` token
/// survives substitution, i.e. a placeholder was used without a
/// declared parameter.
pub fn rewrite_placeholders(query: &QueryDescriptor) -> Result<String, CompileError> {
    let mut rewritten = query.sql.clone();

    for (idx, param) in query.params.iter().enumerate() {
        rewritten = rewritten.replace(&format!("${{{}}}", param.name), &format!("${}", idx + 1));
    }

    if let Some(start) = rewritten.find("${") {
        let rest = &rewritten[start + 2..];
        let placeholder = rest
            .split('}')
            .next()
            .unwrap_or(rest)
            .to_string();
        return Err(CompileError::UnboundPlaceholder { placeholder });
    }

    Ok(rewritten)
}

/// Compile one invocation of a query: draw one value per parameter in
/// declared order and pair them with the already-rewritten SQL text.
pub(crate) fn compile_invocation(
    registry: &GeneratorRegistry,
    step: &str,
    query: &QueryDescriptor,
    sql: &str,
) -> Result<CompiledStatement, CompileError> {
    let mut values = Vec::with_capacity(query.params.len());

    for param in &query.params {
        let key = GeneratorKey::new(step, &query.name, &param.name);

        let generator = registry
            .lookup(&key)
            .ok_or_else(|| CompileError::MissingGenerator {
                param: param.name.clone(),
            })?;

        let value = next_value(generator).map_err(|source| CompileError::Generation {
            param: param.name.clone(),
            source,
        })?;

        values.push(value);
    }

    Ok(CompiledStatement {
        name: query.name.clone(),
        sql: sql.to_string(),
        values,
    })
}

fn next_value(
    generator: &Mutex<ValueGenerator>,
) -> Result<Value, sqlbench_generator::GeneratorError> {
    // Generators hold plain state; a poisoned lock still carries a
    // usable generator, so recover it instead of propagating the panic.
    let mut guard = match generator.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.next_value()
}

/// Compile a query descriptor into one batch.
///
/// The SQL text is built once per query; each of the `count` repetitions
/// yields an independent statement sharing that text with a fresh value
/// list. The first generator failure aborts the remaining work with no
/// statements emitted.
pub fn compile_query(
    registry: &GeneratorRegistry,
    step: &str,
    query: &QueryDescriptor,
) -> Result<CompiledBatch, CompileError> {
    tracing::debug!(
        step,
        query = %query.name,
        sql = %query.sql,
        count = query.count,
        "build query"
    );

    let sql = rewrite_placeholders(query)?;

    let mut statements = Vec::with_capacity(query.count as usize);
    for _ in 0..query.count {
        statements.push(compile_invocation(registry, step, query, &sql)?);
    }

    Ok(CompiledBatch::plain(statements))
}
