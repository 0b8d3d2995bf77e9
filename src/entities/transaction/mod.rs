//! Transaction entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
#[cfg(feature = "postgres")]
pub mod store;

pub use descriptor::TransactionDescriptor;
pub use handlers::{complete, refund};
pub use model::{Transaction, TransactionKind, TransactionPayload, TransactionStatus};
