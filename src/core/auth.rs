//! Authentication and authorization
//!
//! - [`TokenService`] issues and verifies HS256 JWTs
//! - [`AuthContext`] is an axum extractor built from the `Authorization` header
//! - [`AuthPolicy`] decides whether a context may perform an operation

use crate::config::AuthConfig;
use crate::core::error::{AuthError, TrocaError};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Identity a token is issued for
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

/// Login response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
    #[serde(rename = "type")]
    pub token_type: String,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
    issuer: String,
    audience: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            }),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_secs: config.token_ttl_secs,
        }
    }

    /// Sign a token for `subject`
    pub fn issue(&self, subject: TokenSubject<'_>) -> anyhow::Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.user_id.to_string(),
            name: subject.name.to_string(),
            email: subject.email.to_string(),
            role: subject.role.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now + self.ttl_secs,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)?;
        Ok(IssuedToken {
            token,
            expires_in: self.ttl_secs,
            token_type: "Bearer".to_string(),
        })
    }

    /// Verify signature, issuer, audience and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken {
                message: e.to_string(),
            })
    }
}

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq)]
pub enum AuthContext {
    /// Authenticated user
    User {
        user_id: i64,
        email: String,
        roles: Vec<String>,
    },

    /// No `Authorization` header
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<i64> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        match self {
            AuthContext::User { roles, .. } => roles.iter().any(|r| r == role),
            AuthContext::Anonymous => false,
        }
    }

    fn from_claims(claims: Claims) -> Result<Self, AuthError> {
        let user_id = claims.sub.parse().map_err(|_| AuthError::InvalidToken {
            message: format!("subject '{}' is not a user id", claims.sub),
        })?;
        Ok(AuthContext::User {
            user_id,
            email: claims.email,
            roles: vec![claims.role],
        })
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = TrocaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(AuthContext::Anonymous);
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::InvalidToken {
                message: "expected 'Bearer <token>'".to_string(),
            })?;

        let tokens = TokenService::from_ref(state);
        let claims = tokens.verify(token).inspect_err(|e| {
            tracing::warn!("Rejected bearer token: {}", e);
        })?;
        Ok(AuthContext::from_claims(claims)?)
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// User must have one of these roles
    HasRole(Vec<String>),
}

impl AuthPolicy {
    /// Shorthand for `HasRole` with a single role
    pub fn role(role: &str) -> Self {
        AuthPolicy::HasRole(vec![role.to_string()])
    }

    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),
            AuthPolicy::HasRole(required) => required.iter().any(|r| context.has_role(r)),
        }
    }

    /// Like `check`, but explains the refusal
    ///
    /// Anonymous callers get `Unauthenticated` (401); authenticated callers
    /// without the role get `Forbidden` (403).
    pub fn enforce(&self, context: &AuthContext) -> Result<(), AuthError> {
        if self.check(context) {
            return Ok(());
        }
        match (self, context) {
            (_, AuthContext::Anonymous) => Err(AuthError::Unauthenticated),
            (AuthPolicy::HasRole(required), _) => Err(AuthError::Forbidden {
                required: required.clone(),
            }),
            _ => Err(AuthError::Unauthenticated),
        }
    }
}
