//! Entity descriptor for Exchange

use super::handlers::update_status;
use super::model::Exchange;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::crud::{relation_routes, resource_routes};
use crate::server::host::AppState;
use axum::{Router, routing::patch};

/// Descriptor for the Exchange entity
pub struct ExchangeDescriptor;

impl EntityDescriptor for ExchangeDescriptor {
    fn entity_type(&self) -> &str {
        "exchange"
    }

    fn plural(&self) -> &str {
        "exchanges"
    }

    fn build_routes(&self) -> Router<AppState> {
        resource_routes::<Exchange>()
            .merge(relation_routes::<Exchange>(Exchange::RELATIONS))
            .route("/exchanges/{id}/status", patch(update_status))
    }
}
