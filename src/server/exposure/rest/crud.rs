//! Generic CRUD handlers shared by every resource
//!
//! A resource implements [`RestResource`] to describe how request payloads
//! become records; the handlers here take care of ids, paging, hypermedia
//! links, status codes and the admin-only delete rule.

use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::entity::{Entity, Relation};
use crate::core::error::{EntityError, RequestError, TrocaError, TrocaResult, ValidationError};
use crate::core::hateoas::{Link, LinkBuilder, PageResource, Resource};
use crate::core::query::{PageRequest, QueryParams};
use crate::core::service::DataService;
use crate::core::validation::ValidatedJson;
use crate::entities::user::UserRole;
use crate::server::host::{AppState, ServerHost};
use crate::storage::Stores;
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderName, StatusCode, header},
    routing::get,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use validator::Validate;

/// A record exposed through the generic CRUD routes
#[async_trait]
pub trait RestResource: Entity + Serialize {
    /// POST body
    type Create: DeserializeOwned + Validate + Send + 'static;

    /// PUT body
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// The data service holding this resource
    fn store(stores: &Stores) -> &Arc<dyn DataService<Self>>;

    /// Build a new record, checking references and uniqueness
    async fn from_create(host: &ServerHost, payload: Self::Create) -> TrocaResult<Self>;

    /// Apply a PUT body to the stored record
    async fn apply_update(
        host: &ServerHost,
        current: Self,
        payload: Self::Update,
    ) -> TrocaResult<Self>;

    /// Apply the delete rules of dependent records before `id` is removed
    async fn before_delete(_host: &ServerHost, _id: i64) -> TrocaResult<()> {
        Ok(())
    }

    /// Links attached to single-record responses
    fn links(&self, links: &LinkBuilder) -> Vec<Link> {
        links.entity_links::<Self>(self.id())
    }
}

/// Parse a path id
pub fn parse_id(raw: &str) -> TrocaResult<i64> {
    raw.parse()
        .map_err(|_| TrocaError::from(RequestError::InvalidEntityId { id: raw.to_string() }))
}

/// Resolve paging parameters, reporting bad query strings as JSON errors
pub fn page_request(
    host: &ServerHost,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> TrocaResult<PageRequest> {
    let Query(params) = query.map_err(|rejection| RequestError::InvalidQuery {
        message: rejection.body_text(),
    })?;
    Ok(params.resolve(&host.config.pagination))
}

/// Fetch a record or fail with 404
pub async fn load<R: RestResource>(host: &ServerHost, id: i64) -> TrocaResult<R> {
    R::store(&host.stores)
        .get(id)
        .await?
        .ok_or_else(|| EntityError::not_found(R::resource_name_singular(), id).into())
}

/// Fetch a record referenced from a payload or fail with 422
pub async fn require<T: Entity>(
    store: &Arc<dyn DataService<T>>,
    field: &str,
    id: i64,
) -> TrocaResult<T> {
    store
        .get(id)
        .await?
        .ok_or_else(|| ValidationError::reference(field, T::resource_name_singular(), id).into())
}

/// Wrap a record with its links
pub fn to_resource<R: RestResource>(host: &ServerHost, entity: R) -> Resource<R> {
    let links = entity.links(&host.links);
    Resource {
        data: entity,
        links,
    }
}

/// Store an already-modified record and respond with it
pub async fn save<R: RestResource>(
    host: &ServerHost,
    id: i64,
    entity: R,
) -> TrocaResult<Json<Resource<R>>> {
    let saved = R::store(&host.stores).update(id, entity).await?;
    tracing::info!(resource = R::resource_name(), id, "updated");
    Ok(Json(to_resource(host, saved)))
}

pub async fn list<R: RestResource>(
    State(host): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> TrocaResult<Json<PageResource<R>>> {
    let request = page_request(&host, query)?;
    let listing = R::store(&host.stores).list(request).await?;
    Ok(Json(host.page(R::resource_name(), request, listing)))
}

pub async fn fetch<R: RestResource>(
    State(host): State<AppState>,
    Path(id): Path<String>,
) -> TrocaResult<Json<Resource<R>>> {
    let id = parse_id(&id)?;
    tracing::debug!(resource = R::resource_name(), id, "fetch");
    let entity = load::<R>(&host, id).await?;
    Ok(Json(to_resource(&host, entity)))
}

pub async fn create<R: RestResource>(
    State(host): State<AppState>,
    ValidatedJson(payload): ValidatedJson<R::Create>,
) -> TrocaResult<(StatusCode, [(HeaderName, String); 1], Json<Resource<R>>)> {
    let entity = R::from_create(&host, payload).await?;
    let created = R::store(&host.stores).create(entity).await?;
    tracing::info!(resource = R::resource_name(), id = created.id(), "created");

    let location = host.links.item::<R>(created.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(to_resource(&host, created)),
    ))
}

pub async fn update<R: RestResource>(
    State(host): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<R::Update>,
) -> TrocaResult<Json<Resource<R>>> {
    let id = parse_id(&id)?;
    let current = load::<R>(&host, id).await?;
    let next = R::apply_update(&host, current, payload).await?;
    save(&host, id, next).await
}

/// DELETE is reserved to administrators
pub async fn remove<R: RestResource>(
    State(host): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> TrocaResult<StatusCode> {
    AuthPolicy::role(UserRole::Admin.as_str())
        .enforce(&auth)
        .inspect_err(|e| tracing::warn!(resource = R::resource_name(), "delete refused: {}", e))?;

    let id = parse_id(&id)?;
    let store = R::store(&host.stores);
    if !store.exists(id).await? {
        return Err(EntityError::not_found(R::resource_name_singular(), id).into());
    }
    R::before_delete(&host, id).await?;
    if !store.delete(id).await? {
        return Err(EntityError::not_found(R::resource_name_singular(), id).into());
    }
    tracing::info!(resource = R::resource_name(), id, by = ?auth.user_id(), "deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Rows of `R` whose `fields` reference the path id
pub async fn list_related<R: RestResource>(
    host: AppState,
    relation: Relation,
    raw_id: String,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> TrocaResult<Json<PageResource<R>>> {
    let id = parse_id(&raw_id)?;
    let request = page_request(&host, query)?;
    let listing = R::store(&host.stores)
        .find_by(relation.fields, id, request)
        .await?;
    let path = format!("{}/{}/{}", R::resource_name(), relation.segment, id);
    Ok(Json(host.page(&path, request, listing)))
}

/// `GET/POST /{plural}` and `GET/PUT/DELETE /{plural}/{id}`
pub fn resource_routes<R: RestResource>() -> Router<AppState> {
    let collection = format!("/{}", R::resource_name());
    let item = format!("/{}/{{id}}", R::resource_name());

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(fetch::<R>).put(update::<R>).delete(remove::<R>),
        )
}

/// `GET /{plural}/{segment}/{id}` for each relation
pub fn relation_routes<R: RestResource>(relations: &[Relation]) -> Router<AppState> {
    relations.iter().fold(Router::new(), |router, &relation| {
        let path = format!("/{}/{}/{{id}}", R::resource_name(), relation.segment);
        router.route(
            &path,
            get(
                move |State(host): State<AppState>,
                      Path(id): Path<String>,
                      query: Result<Query<QueryParams>, QueryRejection>| async move {
                    list_related::<R>(host, relation, id, query).await
                },
            ),
        )
    })
}
