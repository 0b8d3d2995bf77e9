//! Registry of the resources mounted by the server
//!
//! Modules hand their descriptors to the registry through
//! [`EntityRegistry::register_module`], which keeps track of which module
//! owns each entity type so that two modules can never serve the same
//! resource.

use super::host::AppState;
use crate::core::module::Module;
use anyhow::{Result, bail};
use axum::Router;
use std::collections::BTreeMap;

/// Routes contributed by one resource
///
/// Paths are relative to the API prefix; state is attached once the routers
/// are merged.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "skill")
    fn entity_type(&self) -> &str;

    /// The collection segment (e.g., "skills")
    fn plural(&self) -> &str;

    /// CRUD, relation and action routes of the resource
    fn build_routes(&self) -> Router<AppState>;
}

struct Entry {
    module: String,
    descriptor: Box<dyn EntityDescriptor>,
}

/// Resources keyed by entity type, in name order
#[derive(Default)]
pub struct EntityRegistry {
    entries: BTreeMap<String, Entry>,
    current_module: Option<String>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every resource of `module`
    ///
    /// Fails, leaving the registry untouched, when the module declares an
    /// entity type another module already serves, or when it registers a
    /// different set of descriptors than it declares.
    pub fn register_module(&mut self, module: &dyn Module) -> Result<()> {
        let declared = module.entity_types();
        if let Some((entity, owner)) = declared
            .iter()
            .find_map(|t| self.owner_of(t).map(|owner| (*t, owner)))
        {
            bail!(
                "Module '{}' registers entity '{}' already served by module '{}'",
                module.name(),
                entity,
                owner
            );
        }

        tracing::debug!("Registering module '{}' ({})", module.name(), declared.join(", "));

        let mut scratch = EntityRegistry {
            entries: BTreeMap::new(),
            current_module: Some(module.name().to_string()),
        };
        module.register_entities(&mut scratch);

        let mut registered: Vec<&str> = scratch.entity_types();
        let mut expected = declared.clone();
        registered.sort_unstable();
        expected.sort_unstable();
        if registered != expected {
            bail!(
                "Module '{}' declares [{}] but registered [{}]",
                module.name(),
                expected.join(", "),
                registered.join(", ")
            );
        }

        self.entries.append(&mut scratch.entries);
        Ok(())
    }

    /// Add one descriptor; called by modules from `register_entities`
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let module = self
            .current_module
            .clone()
            .unwrap_or_else(|| "<none>".to_string());
        tracing::debug!("Registering routes for /{} ({})", descriptor.plural(), module);
        self.entries.insert(
            descriptor.entity_type().to_string(),
            Entry { module, descriptor },
        );
    }

    /// Module serving `entity_type`, if any
    pub fn owner_of(&self, entity_type: &str) -> Option<&str> {
        self.entries.get(entity_type).map(|e| e.module.as_str())
    }

    /// Merge the routes of every resource
    pub fn build_routes(&self) -> Router<AppState> {
        self.entries
            .values()
            .fold(Router::new(), |router, entry| router.merge(entry.descriptor.build_routes()))
    }

    /// Registered entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
