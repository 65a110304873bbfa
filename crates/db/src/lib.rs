//! Data access for the `dinosaur` table.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// DDL for the only table this service owns. Safe to run on every start.
const CREATE_DINOSAUR_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS dinosaur ( \
        id BIGSERIAL PRIMARY KEY, \
        name VARCHAR(100) NOT NULL, \
        image VARCHAR(50) NOT NULL, \
        power VARCHAR(50) NOT NULL \
    )";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Provision the `dinosaur` table if it does not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_DINOSAUR_TABLE).execute(pool).await?;
    tracing::debug!("dinosaur table ensured");
    Ok(())
}
