//! REST API exposure
//!
//! Consumes a `ServerHost` and produces the Axum `Router`: health probes at
//! the root, every registered resource plus `/auth/login` under the
//! configured base path, wrapped in tracing and CORS layers.

pub mod auth;
pub mod crud;

use crate::server::entity_registry::EntityRegistry;
use crate::server::host::{AppState, ServerHost};
use anyhow::Result;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

const SERVICE_NAME: &str = "troca-comigo";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a fully configured router with:
    /// - Health check routes (`/health`, `/health/live`, `/health/ready`)
    /// - Entity CRUD and relation routes from the registry
    /// - The login route
    pub fn build_router(host: Arc<ServerHost>, registry: &EntityRegistry) -> Result<Router> {
        let prefix = host.config.api_prefix();
        let cors = host.config.server.cors;

        let api = registry.build_routes().merge(auth::auth_routes());
        let api = if prefix.is_empty() {
            api
        } else {
            Router::new().nest(prefix, api)
        };

        let cors_layer = if cors {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        };

        let app = Self::health_routes()
            .merge(api)
            .with_state(host)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors_layer),
            );

        Ok(app)
    }

    /// Build health check routes
    fn health_routes() -> Router<AppState> {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/health/live", get(Self::health_check))
            .route("/health/ready", get(Self::readiness))
    }

    /// Liveness endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME
        }))
    }

    /// Readiness: the storage backend answers a trivial query
    async fn readiness(State(host): State<AppState>) -> (StatusCode, Json<Value>) {
        let backend = host.stores.health.name().to_string();
        match host.stores.health.check().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ok",
                    "service": SERVICE_NAME,
                    "checks": { "storage": "ok", "backend": backend }
                })),
            ),
            Err(e) => {
                tracing::error!(backend = %backend, "readiness check failed: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "unavailable",
                        "service": SERVICE_NAME,
                        "checks": { "storage": e.to_string(), "backend": backend }
                    })),
                )
            }
        }
    }
}
