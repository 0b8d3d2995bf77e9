use anyhow::Result;
use troca_comigo::config::{AppConfig, DatabaseBackend};
use troca_comigo::entities::MarketplaceModule;
use troca_comigo::server::ServerBuilder;
use troca_comigo::storage::Stores;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "troca_comigo=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load()?;
    let addr = config.server.bind_address();

    let stores = match config.database.backend {
        DatabaseBackend::Memory => {
            tracing::info!("Using in-memory storage; data is lost on restart");
            Stores::in_memory()
        }
        DatabaseBackend::Postgres => postgres_stores(&config).await?,
    };

    ServerBuilder::new()
        .with_config(config)
        .with_stores(stores)
        .register_module(MarketplaceModule)?
        .serve(&addr)
        .await
}

#[cfg(feature = "postgres")]
async fn postgres_stores(config: &AppConfig) -> Result<Stores> {
    use troca_comigo::storage::postgres;

    let pool = postgres::connect(&config.database).await?;
    postgres::migrate(&pool).await?;
    Ok(Stores::postgres(pool))
}

#[cfg(not(feature = "postgres"))]
async fn postgres_stores(_config: &AppConfig) -> Result<Stores> {
    anyhow::bail!("database.backend is 'postgres' but this binary was built without the 'postgres' feature")
}
