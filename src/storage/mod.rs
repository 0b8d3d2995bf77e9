//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
mod references;

pub use in_memory::{InMemoryDataService, InMemoryHealth};
#[cfg(feature = "postgres")]
pub use postgres::{PostgresDataService, PostgresHealth};

use crate::core::service::{DataService, HealthCheck};
use crate::entities::{Evaluation, Exchange, Skill, Transaction, User};
use std::sync::Arc;

/// One data service per resource plus the readiness probe of the backend
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn DataService<User>>,
    pub skills: Arc<dyn DataService<Skill>>,
    pub exchanges: Arc<dyn DataService<Exchange>>,
    pub evaluations: Arc<dyn DataService<Evaluation>>,
    pub transactions: Arc<dyn DataService<Transaction>>,
    pub health: Arc<dyn HealthCheck>,
}

impl Stores {
    /// Process-local tables, empty at startup
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryDataService::new()),
            skills: Arc::new(InMemoryDataService::new()),
            exchanges: Arc::new(InMemoryDataService::new()),
            evaluations: Arc::new(InMemoryDataService::new()),
            transactions: Arc::new(InMemoryDataService::new()),
            health: Arc::new(InMemoryHealth),
        }
    }

    /// Tables in a Postgres database sharing one pool
    #[cfg(feature = "postgres")]
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            users: Arc::new(PostgresDataService::new(pool.clone())),
            skills: Arc::new(PostgresDataService::new(pool.clone())),
            exchanges: Arc::new(PostgresDataService::new(pool.clone())),
            evaluations: Arc::new(PostgresDataService::new(pool.clone())),
            transactions: Arc::new(PostgresDataService::new(pool.clone())),
            health: Arc::new(PostgresHealth::new(pool)),
        }
    }
}
