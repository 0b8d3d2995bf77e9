//! Evaluation entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
#[cfg(feature = "postgres")]
pub mod store;

pub use descriptor::EvaluationDescriptor;
pub use model::{Evaluation, EvaluationUpdate, NewEvaluation};
