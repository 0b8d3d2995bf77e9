//! Axum extractor for validated payloads

use crate::core::error::{TrocaError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that parses a JSON body and runs its validation rules
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_skill(
///     State(host): State<AppState>,
///     ValidatedJson(payload): ValidatedJson<SkillPayload>,
/// ) -> TrocaResult<Json<Resource<Skill>>> {
///     // payload already passed every #[validate(...)] rule
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = TrocaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::InvalidPayload {
                message: rejection.body_text(),
            })?;

        payload.validate()?;
        Ok(ValidatedJson(payload))
    }
}
