//! Table translator: schema descriptors to DDL batches.

use sqlbench_core::{ColumnDescriptor, CompiledBatch, CompiledStatement, TableDescriptor};

/// Compile a table descriptor into its DDL batch.
///
/// One `CREATE TABLE IF NOT EXISTS` statement followed by one
/// `CREATE INDEX IF NOT EXISTS` per declared index, table first. Every
/// statement is idempotent and independent, so the batch carries no
/// isolation directive.
pub fn compile_table(table: &TableDescriptor) -> CompiledBatch {
    tracing::debug!(table = %table.name, columns = table.columns.len(), "build table");

    let mut statements = Vec::with_capacity(1 + table.indexes.len());
    statements.push(create_table_statement(table));

    for index in &table.indexes {
        statements.push(CompiledStatement {
            name: format!("create_index_{}", index.name),
            sql: format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({});",
                index.name,
                table.name,
                index.columns.join(", ")
            ),
            values: vec![],
        });
    }

    CompiledBatch::plain(statements)
}

fn create_table_statement(table: &TableDescriptor) -> CompiledStatement {
    let columns: Vec<String> = table.columns.iter().map(column_clause).collect();

    CompiledStatement {
        name: format!("create_table_{}", table.name),
        sql: format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            table.name,
            columns.join(", ")
        ),
        values: vec![],
    }
}

/// Build one column clause: `name sql_type` plus constraint tokens in
/// fixed order. A raw `constraint` override replaces the flag-derived
/// tokens rather than appending to them.
fn column_clause(column: &ColumnDescriptor) -> String {
    let mut tokens: Vec<&str> = Vec::new();

    if column.primary_key {
        tokens.push("PRIMARY KEY");
    }

    if !column.nullable {
        tokens.push("NOT NULL");
    }

    if column.unique {
        tokens.push("UNIQUE");
    }

    if let Some(constraint) = &column.constraint {
        tokens = vec![constraint.as_str()];
    }

    if tokens.is_empty() {
        format!("{} {}", column.name, column.sql_type)
    } else {
        format!("{} {} {}", column.name, column.sql_type, tokens.join(" "))
    }
}
