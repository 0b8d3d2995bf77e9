//! Module system
//!
//! A module groups related entities and registers their routes with the
//! server in one call.

use crate::server::entity_registry::EntityRegistry;

/// Trait for a group of entities served together
pub trait Module: Send + Sync {
    /// Module name, used in logs
    fn name(&self) -> &str;

    /// Singular names of the entity types this module provides
    fn entity_types(&self) -> Vec<&str>;

    /// Register the entity descriptors with the registry
    fn register_entities(&self, registry: &mut EntityRegistry);
}
