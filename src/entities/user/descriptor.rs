//! Entity descriptor for User

use super::model::User;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::crud::resource_routes;
use crate::server::host::AppState;
use axum::Router;

/// Descriptor for the User entity
pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn build_routes(&self) -> Router<AppState> {
        resource_routes::<User>()
    }
}
