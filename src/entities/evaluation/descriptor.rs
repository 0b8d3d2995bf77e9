//! Entity descriptor for Evaluation

use super::model::Evaluation;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::crud::{relation_routes, resource_routes};
use crate::server::host::AppState;
use axum::Router;

/// Descriptor for the Evaluation entity
pub struct EvaluationDescriptor;

impl EntityDescriptor for EvaluationDescriptor {
    fn entity_type(&self) -> &str {
        "evaluation"
    }

    fn plural(&self) -> &str {
        "evaluations"
    }

    fn build_routes(&self) -> Router<AppState> {
        resource_routes::<Evaluation>().merge(relation_routes::<Evaluation>(Evaluation::RELATIONS))
    }
}
