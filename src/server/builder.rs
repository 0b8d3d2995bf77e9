//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::core::module::Module;
use crate::storage::Stores;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(config)
///     .with_stores(Stores::in_memory())
///     .register_module(MarketplaceModule)?
///     .serve("0.0.0.0:8080")
///     .await?;
/// ```
pub struct ServerBuilder {
    config: Option<AppConfig>,
    stores: Option<Stores>,
    entity_registry: EntityRegistry,
    modules: Vec<Arc<dyn Module>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            stores: None,
            entity_registry: EntityRegistry::new(),
            modules: Vec::new(),
        }
    }

    /// Use this configuration instead of the defaults
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use these data services instead of fresh in-memory tables
    pub fn with_stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Register a module and the routes of its entities
    ///
    /// Fails when the module declares an entity type another module
    /// already registered.
    pub fn register_module(mut self, module: impl Module + 'static) -> Result<Self> {
        self.entity_registry.register_module(&module)?;
        self.modules.push(Arc::new(module));
        Ok(self)
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let config = self.config.take().unwrap_or_default();
        config.validate()?;
        let stores = self.stores.take().unwrap_or_else(Stores::in_memory);
        Ok(ServerHost::new(config, stores))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        if self.modules.is_empty() {
            tracing::warn!("No modules registered; only health and auth routes are served");
        }
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, &self.entity_registry)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
