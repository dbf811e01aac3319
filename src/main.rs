//! Users API server: loads config from env, bootstraps the database, serves the router.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use users_api::{app_router, connect, ensure_users_table, AppState, PgUserStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("users_api=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        base_path = %config.base_path,
        create_database = config.create_database,
        "starting"
    );

    let pool = connect(&config).await?;
    ensure_users_table(&pool).await?;
    tracing::info!("users table ready");

    let state = AppState::new(PgUserStore::new(pool));
    let app = app_router(state, &config.base_path, config.body_limit);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
