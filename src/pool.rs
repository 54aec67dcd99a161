//! Connection pool construction.

use crate::config::PoolOptions;
use crate::error::{ConfigError, DriverError, ExecuteError};
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;
use tracing::info;

/// The shared PostgreSQL connection pool.
pub type PgPool = bb8::Pool<PostgresConnectionManager<NoTls>>;

/// Build the pool from validated options and verify connectivity.
///
/// The URL is parsed by the postgres client itself, so a malformed URL
/// surfaces as a configuration error before any connection is attempted.
pub async fn connect_pool(options: &PoolOptions) -> Result<PgPool, DriverError> {
    let manager = PostgresConnectionManager::new_from_stringlike(&options.url, NoTls)
        .map_err(ConfigError::InvalidUrl)?;

    let pool = bb8::Pool::builder()
        .max_size(options.max_conns)
        .min_idle(options.min_conns)
        .max_lifetime(options.max_conn_lifetime)
        .idle_timeout(options.max_conn_idle_time)
        .build(manager)
        .await
        .map_err(ExecuteError::Postgres)?;

    // Round-trip once so a bad address or credentials fail initialize,
    // not the first batch.
    {
        let conn = pool.get().await.map_err(ExecuteError::Acquire)?;
        conn.simple_query("SELECT 1")
            .await
            .map_err(ExecuteError::Postgres)?;
    }

    info!(
        max_conns = options.max_conns,
        min_conns = options.min_conns,
        "connection pool ready"
    );

    Ok(pool)
}
