//! Entity descriptor for Transaction

use super::handlers::{complete, refund};
use super::model::Transaction;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::crud::{relation_routes, resource_routes};
use crate::server::host::AppState;
use axum::{Router, routing::patch};

/// Descriptor for the Transaction entity
pub struct TransactionDescriptor;

impl EntityDescriptor for TransactionDescriptor {
    fn entity_type(&self) -> &str {
        "transaction"
    }

    fn plural(&self) -> &str {
        "transactions"
    }

    fn build_routes(&self) -> Router<AppState> {
        resource_routes::<Transaction>()
            .merge(relation_routes::<Transaction>(Transaction::RELATIONS))
            .route("/transactions/{id}/complete", patch(complete))
            .route("/transactions/{id}/refund", patch(refund))
    }
}
