pub mod repository;

pub use repository::*;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect a pool against `database_url`, applying the same migrations the
/// `[package.metadata.sqlx]` entry points integration tests at.
pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(max_connections).connect(database_url).await
}
