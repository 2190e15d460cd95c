use axum::{extract::FromRequestParts, http::HeaderName};

use crate::{error::AppError, models::ClientId};

pub const CLIENT_ID_HEADER: HeaderName = HeaderName::from_static("x-client-id");

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(&CLIENT_ID_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-client-id header".into()))?
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid x-client-id header".into()))?;

        ClientId::parse(raw).ok_or_else(|| AppError::BadRequest("Invalid x-client-id header".into()))
    }
}
