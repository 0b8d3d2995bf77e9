//! Marketplace resources
//!
//! Each resource lives in its own module with the same layout:
//! - `model`: the stored record, its enums and request payloads
//! - `handlers`: payload mapping plus any resource-specific endpoints
//! - `descriptor`: the routes it contributes to the server
//! - `store`: the Postgres row mapping

#[macro_use]
pub mod macros;

pub mod evaluation;
pub mod exchange;
pub mod skill;
pub mod transaction;
pub mod user;

use crate::core::module::Module;
use crate::server::entity_registry::EntityRegistry;
use thiserror::Error;

pub use evaluation::Evaluation;
pub use exchange::Exchange;
pub use skill::Skill;
pub use transaction::Transaction;
pub use user::User;

/// A stored string did not match any enum variant
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Registers the five marketplace resources
pub struct MarketplaceModule;

impl Module for MarketplaceModule {
    fn name(&self) -> &str {
        "troca-comigo"
    }

    fn entity_types(&self) -> Vec<&str> {
        vec!["user", "skill", "exchange", "evaluation", "transaction"]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(Box::new(user::UserDescriptor));
        registry.register(Box::new(skill::SkillDescriptor));
        registry.register(Box::new(exchange::ExchangeDescriptor));
        registry.register(Box::new(evaluation::EvaluationDescriptor));
        registry.register(Box::new(transaction::TransactionDescriptor));
    }
}
