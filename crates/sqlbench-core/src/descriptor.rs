//! Benchmark descriptor tree.
//!
//! The host decodes a benchmark description (YAML in practice) into this
//! tree once per run: steps contain workload units, each unit is exactly
//! one of table creation, a parameterized query, or a multi-statement
//! transaction. The compiler consumes the already-decoded tree; wire
//! encoding is not this crate's concern beyond the serde derives.

use crate::batch::IsolationLevel;
use crate::rule::GenerationRule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for descriptor loading.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Error reading a descriptor file
    #[error("Failed to read descriptor file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One table column: SQL type text plus constraint flags.
///
/// When `constraint` is set it replaces all flag-derived constraint
/// tokens instead of being appended to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Literal SQL type text, e.g. `BIGINT` or `VARCHAR(255)`
    pub sql_type: String,

    /// Whether this column is the primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Whether this column accepts NULL
    #[serde(default)]
    pub nullable: bool,

    /// Whether this column carries a UNIQUE constraint
    #[serde(default)]
    pub unique: bool,

    /// Raw constraint override, replacing the flag-derived tokens
    #[serde(default)]
    pub constraint: Option<String>,
}

/// One secondary index: name plus ordered column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Index name
    pub name: String,

    /// Indexed columns in declaration order
    pub columns: Vec<String>,
}

/// Schema-creation unit: a table with its columns and indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,

    /// Secondary indexes, created after the table
    #[serde(default)]
    pub indexes: Vec<IndexDescriptor>,
}

/// One declared query parameter with its generation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name, matching a `${name}` placeholder in the SQL text
    pub name: String,

    /// Rule producing this parameter's values
    pub generator: GenerationRule,
}

/// Parameterized query unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Query name
    pub name: String,

    /// SQL template with `${name}` placeholders
    pub sql: String,

    /// Declared parameters in placeholder-numbering order
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,

    /// Number of independently generated invocations to produce
    #[serde(default = "default_count")]
    pub count: u64,
}

fn default_count() -> u64 {
    1
}

/// Multi-statement transaction unit: inner queries executed as one
/// logical unit at the given isolation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDescriptor {
    /// Transaction name
    pub name: String,

    /// Isolation level the batch is executed under
    #[serde(default)]
    pub isolation: IsolationLevel,

    /// Inner queries in execution order
    pub queries: Vec<QueryDescriptor>,
}

/// One workload unit; exactly one variant.
///
/// This is a closed sum type matched exhaustively throughout the
/// compiler, so an unknown unit kind is a compile-time error for the
/// code and a decode-time error for the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadUnit {
    /// Create a table (and its indexes)
    Table(TableDescriptor),

    /// Run a parameterized query `count` times
    Query(QueryDescriptor),

    /// Run a group of queries as one transaction
    Transaction(TransactionDescriptor),
}

impl WorkloadUnit {
    /// Name of the underlying descriptor, for logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Table(t) => &t.name,
            Self::Query(q) => &q.name,
            Self::Transaction(tx) => &tx.name,
        }
    }
}

/// One benchmark step: a named, ordered group of workload units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Step name; part of every generator key built from this step
    pub name: String,

    /// Workload units in declaration order
    pub units: Vec<WorkloadUnit>,
}

/// The full decoded benchmark tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDescriptor {
    /// Steps in declaration order
    pub steps: Vec<StepDescriptor>,
}

impl BenchmarkDescriptor {
    /// Parse a benchmark descriptor from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, DescriptorError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a benchmark descriptor from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Find a step by name.
    pub fn get_step(&self, name: &str) -> Option<&StepDescriptor> {
        self.steps.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BENCHMARK_YAML: &str = r#"
steps:
  - name: setup
    units:
      - table:
          name: accounts
          columns:
            - name: id
              sql_type: BIGINT
              primary_key: true
            - name: balance
              sql_type: NUMERIC(10,2)
          indexes:
            - name: accounts_balance_idx
              columns: [balance]
  - name: load
    units:
      - query:
          name: insert_account
          sql: "INSERT INTO accounts (id, balance) VALUES (${id}, ${balance})"
          count: 100
          params:
            - name: id
              generator:
                type: sequential
            - name: balance
              generator:
                type: decimal_range
                min: 0.0
                max: 1000.0
      - transaction:
          name: transfer
          isolation: serializable
          queries:
            - name: debit
              sql: "UPDATE accounts SET balance = balance - 1 WHERE id = ${id}"
              params:
                - name: id
                  generator:
                    type: int_range
                    min: 1
                    max: 100
"#;

    #[test]
    fn test_benchmark_from_yaml() {
        let benchmark = BenchmarkDescriptor::from_yaml(BENCHMARK_YAML).unwrap();
        assert_eq!(benchmark.steps.len(), 2);

        let setup = benchmark.get_step("setup").unwrap();
        assert!(matches!(setup.units[0], WorkloadUnit::Table(_)));

        let load = benchmark.get_step("load").unwrap();
        match &load.units[0] {
            WorkloadUnit::Query(q) => {
                assert_eq!(q.name, "insert_account");
                assert_eq!(q.count, 100);
                assert_eq!(q.params.len(), 2);
            }
            other => panic!("expected query unit, got {other:?}"),
        }
        match &load.units[1] {
            WorkloadUnit::Transaction(tx) => {
                assert_eq!(tx.isolation, IsolationLevel::Serializable);
                assert_eq!(tx.queries.len(), 1);
            }
            other => panic!("expected transaction unit, got {other:?}"),
        }
    }

    #[test]
    fn test_transaction_isolation_defaults_to_read_committed() {
        let tx: TransactionDescriptor = serde_yaml::from_str(
            r#"
name: t1
queries: []
"#,
        )
        .unwrap();
        assert_eq!(tx.isolation, IsolationLevel::ReadCommitted);
    }

    #[test]
    fn test_query_count_defaults_to_one() {
        let query: QueryDescriptor = serde_yaml::from_str(
            r#"
name: q1
sql: "SELECT 1"
"#,
        )
        .unwrap();
        assert_eq!(query.count, 1);
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_unit_name() {
        let benchmark = BenchmarkDescriptor::from_yaml(BENCHMARK_YAML).unwrap();
        let names: Vec<&str> = benchmark.steps[1].units.iter().map(|u| u.name()).collect();
        assert_eq!(names, vec!["insert_account", "transfer"]);
    }
}
