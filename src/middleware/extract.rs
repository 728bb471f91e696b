use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// The `{id}` path segment of a stock route, parsed as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for StockId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId(e.body_text()))?;

        raw.parse::<i64>()
            .map(StockId)
            .map_err(|e| AppError::InvalidId(format!("{raw:?}: {e}")))
    }
}

/// JSON object request body decoded without looking at `Content-Type`.
/// Arrays and scalars are rejected even when `T` could be built from them.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidBody(e.body_text()))?;

        let object: Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidBody(e.to_string()))?;

        serde_json::from_value(Value::Object(object))
            .map(JsonBody)
            .map_err(|e| AppError::InvalidBody(e.to_string()))
    }
}
