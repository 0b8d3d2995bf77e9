//! Core module containing fundamental traits and types

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod hateoas;
pub mod module;
pub mod password;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, TokenService};
pub use entity::{Entity, Relation};
pub use error::{TrocaError, TrocaResult};
pub use field::FieldValue;
pub use module::Module;
pub use service::{DataService, HealthCheck};
