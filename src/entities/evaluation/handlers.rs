//! Evaluation payload mapping

use super::model::{Evaluation, EvaluationUpdate, NewEvaluation};
use crate::core::error::TrocaResult;
use crate::core::service::DataService;
use crate::server::exposure::rest::crud::{RestResource, require};
use crate::server::host::ServerHost;
use crate::storage::Stores;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

#[async_trait]
impl RestResource for Evaluation {
    type Create = NewEvaluation;
    type Update = EvaluationUpdate;

    fn store(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.evaluations
    }

    async fn from_create(host: &ServerHost, payload: NewEvaluation) -> TrocaResult<Self> {
        require(&host.stores.exchanges, "exchange_id", payload.exchange_id).await?;
        require(&host.stores.users, "evaluator_id", payload.evaluator_id).await?;
        require(&host.stores.users, "evaluated_id", payload.evaluated_id).await?;

        Ok(Evaluation {
            id: 0,
            exchange_id: payload.exchange_id,
            evaluator_id: payload.evaluator_id,
            evaluated_id: payload.evaluated_id,
            rating: payload.rating,
            comment: payload.comment,
            created_at: Utc::now(),
        })
    }

    async fn apply_update(_host: &ServerHost, current: Self, payload: EvaluationUpdate) -> TrocaResult<Self> {
        Ok(Evaluation {
            rating: payload.rating,
            comment: payload.comment,
            ..current
        })
    }
}
