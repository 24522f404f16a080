//! Product service binary: loads settings from the environment (and `.env`), prepares the
//! store, and serves the product routes.

use product_service::{
    app, apply_migrations, ensure_database_exists, AppState, MemoryProductStore, PgProductStore, Settings,
    StoreBackend,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_service=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let state = match settings.store {
        StoreBackend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            apply_migrations(&pool, &settings.schema).await?;
            AppState::new(PgProductStore::new(pool, settings.schema.clone(), settings.id_prefix.clone()))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory product store; data is lost on exit");
            AppState::new(MemoryProductStore::new(settings.id_prefix.clone()))
        }
    };

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, settings.body_limit)).await?;
    Ok(())
}
