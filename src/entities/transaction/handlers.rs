//! Transaction payload mapping and the settlement endpoints

use super::model::{Transaction, TransactionPayload, TransactionStatus};
use crate::core::error::TrocaResult;
use crate::core::hateoas::{Link, LinkBuilder, Resource};
use crate::core::service::DataService;
use crate::server::exposure::rest::crud::{RestResource, load, parse_id, require, save};
use crate::server::host::{AppState, ServerHost};
use crate::storage::Stores;
use async_trait::async_trait;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use std::sync::Arc;

async fn check_references(host: &ServerHost, payload: &TransactionPayload) -> TrocaResult<()> {
    if let Some(exchange_id) = payload.exchange_id {
        require(&host.stores.exchanges, "exchange_id", exchange_id).await?;
    }
    require(&host.stores.users, "sender_id", payload.sender_id).await?;
    require(&host.stores.users, "recipient_id", payload.recipient_id).await?;
    Ok(())
}

#[async_trait]
impl RestResource for Transaction {
    type Create = TransactionPayload;
    type Update = TransactionPayload;

    fn store(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.transactions
    }

    async fn from_create(host: &ServerHost, payload: TransactionPayload) -> TrocaResult<Self> {
        check_references(host, &payload).await?;
        Ok(Transaction {
            id: 0,
            exchange_id: payload.exchange_id,
            sender_id: payload.sender_id,
            recipient_id: payload.recipient_id,
            credits: payload.credits,
            kind: payload.kind,
            description: payload.description,
            status: payload.status.unwrap_or_default(),
            created_at: Utc::now(),
        })
    }

    async fn apply_update(host: &ServerHost, current: Self, payload: TransactionPayload) -> TrocaResult<Self> {
        check_references(host, &payload).await?;
        Ok(Transaction {
            exchange_id: payload.exchange_id,
            sender_id: payload.sender_id,
            recipient_id: payload.recipient_id,
            credits: payload.credits,
            kind: payload.kind,
            description: payload.description,
            status: payload.status.unwrap_or(current.status),
            ..current
        })
    }

    fn links(&self, links: &LinkBuilder) -> Vec<Link> {
        let item = links.item::<Self>(self.id);
        let mut all = links.entity_links::<Self>(self.id);
        all.push(Link::new(format!("{}/complete", item), "complete", "PATCH"));
        all.push(Link::new(format!("{}/refund", item), "refund", "PATCH"));
        all
    }
}

async fn settle(host: &ServerHost, raw_id: &str, status: TransactionStatus) -> TrocaResult<Json<Resource<Transaction>>> {
    let id = parse_id(raw_id)?;
    let mut transaction = load::<Transaction>(host, id).await?;
    tracing::info!(id, from = %transaction.status, to = %status, "transaction settled");
    transaction.status = status;
    save(host, id, transaction).await
}

/// PATCH /transactions/{id}/complete
pub async fn complete(
    State(host): State<AppState>,
    Path(id): Path<String>,
) -> TrocaResult<Json<Resource<Transaction>>> {
    settle(&host, &id, TransactionStatus::Completed).await
}

/// PATCH /transactions/{id}/refund
pub async fn refund(
    State(host): State<AppState>,
    Path(id): Path<String>,
) -> TrocaResult<Json<Resource<Transaction>>> {
    settle(&host, &id, TransactionStatus::Refunded).await
}
