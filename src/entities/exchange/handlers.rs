//! Exchange payload mapping and the status endpoint

use super::model::{Exchange, ExchangePayload, StatusChange};
use crate::core::error::TrocaResult;
use crate::core::hateoas::{Link, LinkBuilder, Resource};
use crate::core::service::DataService;
use crate::core::validation::ValidatedJson;
use crate::server::exposure::rest::crud::{RestResource, load, parse_id, require, save};
use crate::server::host::{AppState, ServerHost};
use crate::storage::Stores;
use async_trait::async_trait;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use std::sync::Arc;

/// Check every reference and fill in the skill name
async fn resolve(host: &ServerHost, payload: &ExchangePayload) -> TrocaResult<Option<String>> {
    require(&host.stores.users, "mentor_id", payload.mentor_id).await?;
    require(&host.stores.users, "student_id", payload.student_id).await?;
    let skill = require(&host.stores.skills, "skill_id", payload.skill_id).await?;

    Ok(payload.skill_name.clone().or(Some(skill.name)))
}

#[async_trait]
impl RestResource for Exchange {
    type Create = ExchangePayload;
    type Update = ExchangePayload;

    fn store(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.exchanges
    }

    async fn from_create(host: &ServerHost, payload: ExchangePayload) -> TrocaResult<Self> {
        let skill_name = resolve(host, &payload).await?;
        Ok(Exchange {
            id: 0,
            mentor_id: payload.mentor_id,
            student_id: payload.student_id,
            skill_id: payload.skill_id,
            skill_name,
            scheduled_date: payload.scheduled_date,
            duration_hours: payload.duration_hours,
            status: payload.status.unwrap_or_default(),
            meeting_link: payload.meeting_link,
            notes: payload.notes,
            credits_value: payload.credits_value,
            created_at: Utc::now(),
        })
    }

    async fn apply_update(host: &ServerHost, current: Self, payload: ExchangePayload) -> TrocaResult<Self> {
        let skill_name = resolve(host, &payload).await?;
        Ok(Exchange {
            mentor_id: payload.mentor_id,
            student_id: payload.student_id,
            skill_id: payload.skill_id,
            skill_name,
            scheduled_date: payload.scheduled_date,
            duration_hours: payload.duration_hours,
            status: payload.status.unwrap_or(current.status),
            meeting_link: payload.meeting_link,
            notes: payload.notes,
            credits_value: payload.credits_value,
            ..current
        })
    }

    async fn before_delete(host: &ServerHost, id: i64) -> TrocaResult<()> {
        Ok(host.stores.release_exchange(id).await?)
    }

    fn links(&self, links: &LinkBuilder) -> Vec<Link> {
        let mut all = links.entity_links::<Self>(self.id);
        all.push(Link::new(
            format!("{}/status", links.item::<Self>(self.id)),
            "update-status",
            "PATCH",
        ));
        all
    }
}

/// PATCH /exchanges/{id}/status
pub async fn update_status(
    State(host): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(change): ValidatedJson<StatusChange>,
) -> TrocaResult<Json<Resource<Exchange>>> {
    let id = parse_id(&id)?;
    let mut exchange = load::<Exchange>(&host, id).await?;
    let status = change.status();
    tracing::info!(id, from = %exchange.status, to = %status, "exchange status change");
    exchange.status = status;
    save(&host, id, exchange).await
}
