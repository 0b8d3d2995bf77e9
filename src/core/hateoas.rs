//! Hypermedia projections: every response carries links to related actions

use crate::core::entity::Entity;
use crate::core::query::PaginationMeta;
use serde::Serialize;

/// A single hypermedia link
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: &str, method: &str) -> Self {
        Self {
            href: href.into(),
            rel: rel.to_string(),
            method: method.to_string(),
        }
    }
}

/// Single-entity response body
#[derive(Debug, Clone, Serialize)]
pub struct Resource<T> {
    pub data: T,
    pub links: Vec<Link>,
}

/// Paged listing response body
#[derive(Debug, Clone, Serialize)]
pub struct PageResource<T> {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub items: Vec<Resource<T>>,
    #[serde(rename = "_links")]
    pub links: Vec<Link>,
}

/// Builds hrefs relative to the API prefix (e.g. `/api/v1`)
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    prefix: String,
}

impl LinkBuilder {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// `/api/v1/{path}`
    pub fn href(&self, path: &str) -> String {
        format!("{}/{}", self.prefix, path.trim_start_matches('/'))
    }

    /// `/api/v1/{resource}/{id}`
    pub fn item<T: Entity>(&self, id: i64) -> String {
        self.href(&format!("{}/{}", T::resource_name(), id))
    }

    /// `self`, `update` and `delete` links for one entity
    pub fn entity_links<T: Entity>(&self, id: i64) -> Vec<Link> {
        let href = self.item::<T>(id);
        vec![
            Link::new(href.clone(), "self", "GET"),
            Link::new(href.clone(), "update", "PUT"),
            Link::new(href, "delete", "DELETE"),
        ]
    }

    /// Wrap a listed item with its `self` link
    pub fn item_resource<T: Entity>(&self, entity: T) -> Resource<T> {
        let links = vec![Link::new(self.item::<T>(entity.id()), "self", "GET")];
        Resource {
            data: entity,
            links,
        }
    }

    /// Navigation links for a listing at `path` (already prefixed)
    ///
    /// `prev` and `next` only appear when such a page exists.
    pub fn page_links(&self, path: &str, meta: &PaginationMeta) -> Vec<Link> {
        let page_href = |page: usize| format!("{}?page={}&limit={}", path, page, meta.limit);
        let mut links = vec![Link::new(page_href(meta.page), "self", "GET")];
        if meta.has_next {
            links.push(Link::new(page_href(meta.page + 1), "next", "GET"));
        }
        if meta.has_prev {
            links.push(Link::new(page_href(meta.page - 1), "prev", "GET"));
        }
        links
    }

    /// Assemble a listing body from one page of rows
    pub fn page<T: Entity>(&self, path: &str, items: Vec<T>, meta: PaginationMeta) -> PageResource<T> {
        let links = self.page_links(path, &meta);
        PageResource {
            total: meta.total,
            page: meta.page,
            limit: meta.limit,
            total_pages: meta.total_pages,
            items: items.into_iter().map(|e| self.item_resource(e)).collect(),
            links,
        }
    }
}
