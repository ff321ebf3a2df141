// src/db.rs
use crate::error::AppResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub async fn create_db_pool() -> AppResult<SqlitePool> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")?;

    tracing::info!("connecting to database: {}", database_url);

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("migrations complete.");

    Ok(pool)
}

/// In-memory pool for tests. A single connection keeps every statement on
/// the same sqlite database.
pub async fn create_test_pool() -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
