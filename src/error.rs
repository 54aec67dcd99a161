//! Error types for the PostgreSQL driver.
//!
//! Configuration errors always fail before any statement runs;
//! execution errors abort the remaining statements of the current batch
//! (rolling back if inside a transaction) and are propagated verbatim.
//! Retry policy belongs to the caller.

use sqlbench_compiler::{CompileError, RegistryError};
use sqlbench_core::IsolationLevel;
use thiserror::Error;

/// Errors raised while validating driver configuration, before the pool
/// is created.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Connection URL rejected by the postgres client
    #[error("invalid connection url: {0}")]
    InvalidUrl(#[source] tokio_postgres::Error),

    /// Duration option that is not a number with an optional h/m/s suffix
    #[error("invalid duration for \"{key}\": \"{value}\"")]
    InvalidDuration { key: String, value: String },

    /// Unparseable trace log level
    #[error("invalid trace log level: {0}")]
    InvalidLogLevel(String),

    /// Cache capacity configured without the matching statement mode
    #[error(
        "\"statement_cache_capacity\" is valid only with \"statement_mode\" set to \"cache_statement\""
    )]
    CacheCapacityMisuse,
}

/// Errors raised while executing a compiled batch.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Could not check a connection out of the pool
    #[error("failed to acquire connection: {0}")]
    Acquire(#[from] bb8::RunError<tokio_postgres::Error>),

    /// The backend rejected a statement
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),

    /// A bound value has no PostgreSQL representation
    #[error("cannot bind parameter {index} of \"{statement}\": {reason}")]
    Bind {
        statement: String,
        index: usize,
        reason: String,
    },

    /// Batch isolation level conflicts with the ambient transaction
    #[error("batch requests isolation level {requested:?} but the ambient transaction runs at {ambient:?}")]
    IsolationMismatch {
        requested: IsolationLevel,
        ambient: Option<IsolationLevel>,
    },
}

/// Umbrella error for the plugin surface.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// Driver used before `initialize` (or after `teardown`)
    #[error("driver is not initialized")]
    NotInitialized,
}
