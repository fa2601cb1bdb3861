use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;

use marketplace_backend::database::{
    kv_store::KeyValueStore, memory_store::MemoryKeyValueStore, pg_store::PgKeyValueStore,
    pool::create_pool,
};
use marketplace_backend::middleware::{cors::web_client_cors, rate_limit};
use marketplace_backend::{
    config::{get_config, init_config},
    routes, AppState,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config();

    let kv: Arc<dyn KeyValueStore> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Persisting jobs in Postgres");
            Arc::new(PgKeyValueStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set, persisting jobs in memory");
            Arc::new(MemoryKeyValueStore::new())
        }
    };

    let app_state = AppState::new(kv)?;

    {
        let mut changes = app_state.job_service.subscribe();
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(event) => info!(job_id = ?event.job_id, "job collection changed"),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "change listener lagged")
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    let app = routes::api_router()
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(config.api_rps),
            rate_limit::rps_middleware,
        ))
        .with_state(app_state)
        .layer(web_client_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
