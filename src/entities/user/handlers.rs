//! User payload mapping

use super::model::{DEFAULT_TIME_CREDITS, NewUser, User, UserUpdate};
use crate::core::error::{EntityError, TrocaResult};
use crate::core::password::hash_password;
use crate::core::service::DataService;
use crate::server::exposure::rest::crud::RestResource;
use crate::server::host::ServerHost;
use crate::storage::Stores;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// E-mails are compared case-insensitively by storing them lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Fail with 409 when another account already uses `email`
async fn ensure_email_free(host: &ServerHost, email: &str, current: Option<i64>) -> TrocaResult<()> {
    let taken = host
        .stores
        .users
        .search("email", email)
        .await?
        .into_iter()
        .any(|user| Some(user.id) != current);

    if taken {
        tracing::debug!(email, "email already registered");
        return Err(EntityError::conflict(format!("e-mail '{}' is already registered", email)).into());
    }
    Ok(())
}

#[async_trait]
impl RestResource for User {
    type Create = NewUser;
    type Update = UserUpdate;

    fn store(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.users
    }

    async fn from_create(host: &ServerHost, payload: NewUser) -> TrocaResult<Self> {
        let email = normalize_email(&payload.email);
        ensure_email_free(host, &email, None).await?;

        let now = Utc::now();
        Ok(User {
            id: 0,
            full_name: payload.full_name.trim().to_string(),
            email,
            password_hash: hash_password(&payload.password)?,
            role: payload.role.unwrap_or_default(),
            bio: payload.bio,
            avatar_url: payload.avatar_url,
            time_credits: payload.time_credits.unwrap_or(DEFAULT_TIME_CREDITS),
            total_sessions_given: 0,
            total_sessions_taken: 0,
            average_rating: 0.0,
            location: payload.location,
            timezone: payload.timezone,
            linkedin_url: payload.linkedin_url,
            created_at: now,
            updated_at: now,
        })
    }

    async fn apply_update(host: &ServerHost, current: Self, payload: UserUpdate) -> TrocaResult<Self> {
        let email = normalize_email(&payload.email);
        if email != current.email {
            ensure_email_free(host, &email, Some(current.id)).await?;
        }

        let password_hash = match payload.password {
            Some(password) => hash_password(&password)?,
            None => current.password_hash,
        };

        Ok(User {
            full_name: payload.full_name.trim().to_string(),
            email,
            password_hash,
            role: payload.role.unwrap_or(current.role),
            bio: payload.bio,
            avatar_url: payload.avatar_url,
            location: payload.location,
            timezone: payload.timezone,
            linkedin_url: payload.linkedin_url,
            updated_at: Utc::now(),
            ..current
        })
    }

    async fn before_delete(host: &ServerHost, id: i64) -> TrocaResult<()> {
        Ok(host.stores.release_user(id).await?)
    }
}
