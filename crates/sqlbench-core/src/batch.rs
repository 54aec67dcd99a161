//! Compiled statement batches.
//!
//! A [`CompiledBatch`] is the unit of work handed from the compiler to an
//! executor: an ordered list of statements plus an isolation directive.
//! The compiler never emits `BEGIN`/`COMMIT` text; transaction framing is
//! applied by the executor from the directive, which keeps the compiled
//! output backend-agnostic.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Standard SQL transaction isolation levels.
///
/// The "no transaction" case is expressed as `Option<IsolationLevel>` on
/// the batch, so an unsupported fifth level cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl Default for IsolationLevel {
    /// PostgreSQL's default level.
    fn default() -> Self {
        Self::ReadCommitted
    }
}

/// One executable statement: final SQL text with positional markers and
/// the values bound to them, in marker order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledStatement {
    /// Statement name, for logging and error context
    pub name: String,

    /// Final SQL text; `${name}` placeholders already rewritten to `$N`
    pub sql: String,

    /// Bound values in positional order
    pub values: Vec<Value>,
}

/// An ordered batch of compiled statements plus an isolation directive.
///
/// With no directive the statements are independent; with a directive the
/// batch is indivisible and must be applied entirely within one
/// transaction or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledBatch {
    /// Statements in descriptor declaration order
    pub statements: Vec<CompiledStatement>,

    /// Requested isolation level; `None` means plain execution
    pub isolation: Option<IsolationLevel>,
}

impl CompiledBatch {
    /// Create a batch executed statement by statement, outside any
    /// transaction.
    pub fn plain(statements: Vec<CompiledStatement>) -> Self {
        Self {
            statements,
            isolation: None,
        }
    }

    /// Create a batch executed as one transaction at the given level.
    pub fn isolated(statements: Vec<CompiledStatement>, level: IsolationLevel) -> Self {
        Self {
            statements,
            isolation: Some(level),
        }
    }

    /// Number of statements in the batch.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether the batch carries no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
