//! User entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
#[cfg(feature = "postgres")]
pub mod store;

pub use descriptor::UserDescriptor;
pub use model::{NewUser, User, UserRole, UserUpdate};
