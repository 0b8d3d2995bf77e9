//! Skill payload mapping

use super::model::{Skill, SkillPayload};
use crate::core::error::TrocaResult;
use crate::core::service::DataService;
use crate::server::exposure::rest::crud::{RestResource, require};
use crate::server::host::ServerHost;
use crate::storage::Stores;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

fn apply(payload: SkillPayload, id: i64, created_at: chrono::DateTime<Utc>) -> Skill {
    Skill {
        id,
        name: payload.name.trim().to_string(),
        category: payload.category,
        description: payload.description,
        level: payload.level,
        is_offering: payload.is_offering,
        is_seeking: payload.is_seeking,
        hourly_rate: payload.hourly_rate,
        user_id: payload.user_id,
        created_at,
    }
}

#[async_trait]
impl RestResource for Skill {
    type Create = SkillPayload;
    type Update = SkillPayload;

    fn store(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.skills
    }

    async fn from_create(host: &ServerHost, payload: SkillPayload) -> TrocaResult<Self> {
        require(&host.stores.users, "user_id", payload.user_id).await?;
        Ok(apply(payload, 0, Utc::now()))
    }

    async fn apply_update(host: &ServerHost, current: Self, payload: SkillPayload) -> TrocaResult<Self> {
        if payload.user_id != current.user_id {
            require(&host.stores.users, "user_id", payload.user_id).await?;
        }
        Ok(apply(payload, current.id, current.created_at))
    }

    async fn before_delete(host: &ServerHost, id: i64) -> TrocaResult<()> {
        Ok(host.stores.release_skill(id).await?)
    }
}
