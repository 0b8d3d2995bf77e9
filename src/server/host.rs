//! Server host: the state shared by every request handler

use crate::config::AppConfig;
use crate::core::auth::TokenService;
use crate::core::entity::Entity;
use crate::core::hateoas::{LinkBuilder, PageResource};
use crate::core::query::{Listing, PageRequest, PaginationMeta};
use crate::storage::Stores;
use axum::extract::FromRef;
use std::sync::Arc;

/// Host context containing all application state
///
/// Built once by [`ServerBuilder`](super::ServerBuilder) and shared with
/// handlers as [`AppState`].
pub struct ServerHost {
    /// Effective configuration
    pub config: Arc<AppConfig>,

    /// One data service per entity type
    pub stores: Stores,

    /// JWT issuance and verification
    pub tokens: TokenService,

    /// Hypermedia href builder for the configured prefix
    pub links: LinkBuilder,
}

/// Handler state
pub type AppState = Arc<ServerHost>;

impl ServerHost {
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let tokens = TokenService::new(&config.auth);
        let links = LinkBuilder::new(config.api_prefix());
        Self {
            config: Arc::new(config),
            stores,
            tokens,
            links,
        }
    }

    /// Listing body for `path` (relative to the API prefix)
    pub fn page<T: Entity>(
        &self,
        path: &str,
        request: PageRequest,
        listing: Listing<T>,
    ) -> PageResource<T> {
        let meta = PaginationMeta::new(request.page, request.limit, listing.total);
        self.links.page(&self.links.href(path), listing.items, meta)
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(host: &AppState) -> Self {
        host.tokens.clone()
    }
}
