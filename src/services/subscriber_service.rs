// src/services/subscriber_service.rs
use crate::error::AppResult;
use crate::models::subscriber::Subscriber;
use sqlx::SqlitePool;

/// Adds an email to the newsletter list. Re-subscribing an existing email
/// is answered like a success rather than an error; the bool reports
/// whether a new row was created.
pub async fn subscribe(pool: &SqlitePool, email: &str) -> AppResult<(Subscriber, bool)> {
    let email = email.trim().to_lowercase();

    let inserted = sqlx::query("INSERT OR IGNORE INTO subscribers (email) VALUES (?1)")
        .bind(&email)
        .execute(pool)
        .await?
        .rows_affected()
        > 0;

    let subscriber =
        sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers WHERE email = ?1")
            .bind(&email)
            .fetch_one(pool)
            .await?;

    if inserted {
        tracing::info!("new newsletter subscriber: {}", subscriber.email);
    }
    Ok((subscriber, inserted))
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Subscriber>> {
    let rows = sqlx::query_as::<_, Subscriber>(
        "SELECT * FROM subscribers ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let affected = sqlx::query("DELETE FROM subscribers WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(affected > 0)
}
