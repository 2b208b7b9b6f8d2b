//! Request body extraction for the blog endpoints.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body whose failures render as [`ApiError`] instead of
/// axum's 415/422 rejections.
///
/// An empty body (or no body at all) yields `T::default()`, so a missing
/// parameter is reported by the handler the same way as an omitted field.
/// The content type is not checked.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "rejected request body");
            ApiError::InvalidBody {
                status: StatusCode::BAD_REQUEST,
                message: rejection.body_text(),
            }
        })?;

        Ok(Payload(value))
    }
}
