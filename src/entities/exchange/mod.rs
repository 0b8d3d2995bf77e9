//! Exchange entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
#[cfg(feature = "postgres")]
pub mod store;

pub use descriptor::ExchangeDescriptor;
pub use handlers::update_status;
pub use model::{Exchange, ExchangePayload, ExchangeStatus, StatusChange};
