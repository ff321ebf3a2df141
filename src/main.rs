// src/main.rs
use minhaty::{db, services::user_service, state::AppState, web};

use axum::serve;
use std::{env, net::SocketAddr};
use time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, ExpiredDeletion, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            env::var("RUST_LOG")
                .unwrap_or_else(|_| {
                    "minhaty=debug,tower_http=info,sqlx=warn,tower_sessions=info".into()
                })
                .into()
        }))
        .with(fmt::layer())
        .init();

    tracing::info!("starting minhaty server...");

    let db_pool = match db::create_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("database initialization failed: {}", e);
            return Err(anyhow::anyhow!("failed to connect/migrate database: {e}"));
        }
    };

    // First-run admin account, when configured. There is no self-service
    // registration.
    user_service::ensure_bootstrap_admin(&db_pool).await?;

    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("failed to create session store: {e}"))?;
    session_store.migrate().await?;

    // Sweep expired session rows once a day; a stale cookie presented in
    // between simply fails to load and behaves as anonymous.
    let sweep_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = sweep_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60 * 24))
            .await
        {
            tracing::error!("session sweep task failed: {:?}", e);
        }
    });
    tracing::info!("session sweep task started.");

    let production = env::var("APP_ENV").map(|v| v == "production").unwrap_or(false);
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(production)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));
    tracing::info!("session layer configured (secure: {}).", production);

    let app_state = AppState { db_pool };

    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid BIND_ADDR: {e}"))?;
    tracing::info!("listening on http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            return Err(e.into());
        }
    };

    let app = web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CookieManagerLayer::new())
            .layer(session_layer),
    );
    tracing::info!("router and middlewares configured.");

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("fatal server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
