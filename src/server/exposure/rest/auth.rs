//! Token issuance
//!
//! `POST /auth/login` trades an e-mail and password for a bearer token.

use crate::core::auth::{IssuedToken, TokenSubject};
use crate::core::error::{AuthError, TrocaResult};
use crate::core::password::verify_password;
use crate::core::validation::ValidatedJson;
use crate::entities::user::handlers::normalize_email;
use crate::server::host::AppState;
use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

pub async fn login(
    State(host): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> TrocaResult<Json<IssuedToken>> {
    let email = normalize_email(&request.email);
    let user = host
        .stores
        .users
        .search("email", &email)
        .await?
        .into_iter()
        .next();

    let Some(user) = user.filter(|u| verify_password(&request.password, &u.password_hash)) else {
        tracing::warn!(email, "login refused");
        return Err(AuthError::InvalidCredentials.into());
    };

    let token = host.tokens.issue(TokenSubject {
        user_id: user.id,
        name: &user.full_name,
        email: &user.email,
        role: user.role.as_str(),
    })?;

    tracing::info!(user_id = user.id, "token issued");
    Ok(Json(token))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}
