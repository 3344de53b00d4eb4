//! Service entry point: loads config from env, connects the player store, serves the API.

use cricket_roster::{
    app, ensure_database_exists, ensure_players_table, AppState, MemoryPlayerStore, PgPlayerStore, ServiceConfig,
    StoreKind,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cricket_roster=info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "startup failed");
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;

    let state = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_players_table(&pool).await?;
            tracing::info!("connected to postgres");
            AppState::new(PgPlayerStore::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory player store; records are lost on exit");
            AppState::new(MemoryPlayerStore::new())
        }
    };

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit_bytes)).await?;
    Ok(())
}
