//! Request extractors shared by the handlers.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;
use crate::store::collection::RecordId;

/// JSON body that has passed its `Validate` rules.
///
/// Parse failures become `400 {message}` instead of axum's default 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path ids are plain non-negative integers. A well-formed id too large to
/// have ever been issued names no record, so it yields `not_found`.
pub fn parse_id(raw: &str, not_found: ApiError) -> Result<RecordId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest("Invalid id".to_string()));
    }
    raw.parse().map_err(|_| not_found)
}
