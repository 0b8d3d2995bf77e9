//! Entity descriptor for Skill

use super::model::Skill;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::crud::{relation_routes, resource_routes};
use crate::server::host::AppState;
use axum::Router;

/// Descriptor for the Skill entity
pub struct SkillDescriptor;

impl EntityDescriptor for SkillDescriptor {
    fn entity_type(&self) -> &str {
        "skill"
    }

    fn plural(&self) -> &str {
        "skills"
    }

    fn build_routes(&self) -> Router<AppState> {
        resource_routes::<Skill>().merge(relation_routes::<Skill>(Skill::RELATIONS))
    }
}
