//! Server module for building HTTP servers with auto-registered routes
//!
//! `ServerBuilder` collects modules, each registering its entities'
//! CRUD and relation routes, and serves them through the REST exposure.

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use host::{AppState, ServerHost};
