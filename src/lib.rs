//! # Troca Comigo
//!
//! REST API for a skill-exchange marketplace: users offer skills, book
//! mentoring sessions (exchanges) with each other, rate them and move time
//! credits around.
//!
//! ## Layout
//!
//! - [`core`]: entity and storage traits, errors, pagination, hypermedia
//!   links, validation and authentication
//! - [`entities`]: the five resources (users, skills, exchanges,
//!   evaluations, transactions)
//! - [`storage`]: in-memory and Postgres data services
//! - [`server`]: builder, registry and the REST exposure
//! - [`config`]: YAML plus environment configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use troca_comigo::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_config(AppConfig::default())
//!     .with_stores(Stores::in_memory())
//!     .register_module(MarketplaceModule)?
//!     .build()?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, TokenService},
        entity::{Entity, Relation},
        error::{TrocaError, TrocaResult},
        field::FieldValue,
        hateoas::{Link, PageResource, Resource},
        module::Module,
        query::{PageRequest, QueryParams},
        service::{DataService, HealthCheck},
    };

    // === Resources ===
    pub use crate::entities::{Evaluation, Exchange, MarketplaceModule, Skill, Transaction, User};

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, Stores};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresDataService;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
