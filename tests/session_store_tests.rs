// Session persistence rules: an expired record must be unreachable even if
// the client still presents its cookie, and the sweep physically removes it.

use minhaty::db::create_test_pool;
use time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::{ExpiredDeletion, SessionStore};
use tower_sessions_sqlx_store::SqliteStore;

async fn store() -> (SqliteStore, sqlx::SqlitePool) {
    let pool = create_test_pool().await.unwrap();
    let store = SqliteStore::new(pool.clone())
        .with_table_name("sessions")
        .unwrap();
    store.migrate().await.unwrap();
    (store, pool)
}

#[tokio::test]
async fn live_sessions_load_and_expired_ones_do_not() {
    let (store, _pool) = store().await;

    let mut record = Record {
        id: Id::default(),
        data: Default::default(),
        expiry_date: OffsetDateTime::now_utc() + Duration::days(1),
    };
    store.create(&mut record).await.unwrap();
    assert!(store.load(&record.id).await.unwrap().is_some());

    // Simulate the clock passing the expiry by rewriting the record's
    // expiry into the past; no sleeps involved.
    let mut expired = record.clone();
    expired.expiry_date = OffsetDateTime::now_utc() - Duration::hours(2);
    store.save(&expired).await.unwrap();

    assert!(
        store.load(&record.id).await.unwrap().is_none(),
        "a stale cookie must behave as anonymous"
    );
}

#[tokio::test]
async fn sweep_deletes_expired_rows() {
    let (store, pool) = store().await;

    let mut live = Record {
        id: Id::default(),
        data: Default::default(),
        expiry_date: OffsetDateTime::now_utc() + Duration::days(1),
    };
    let mut stale = Record {
        id: Id::default(),
        data: Default::default(),
        expiry_date: OffsetDateTime::now_utc() - Duration::days(2),
    };
    store.create(&mut live).await.unwrap();
    store.create(&mut stale).await.unwrap();

    store.delete_expired().await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1, "only the live session survives the sweep");
    assert!(store.load(&live.id).await.unwrap().is_some());
}
