use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shared::utils::error::AppError;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// JSON body that falls back to `T::default()` when the payload is missing or malformed,
/// leaving validation of the individual fields to the handler.
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, _: &S) -> Result<Self, Self::Rejection> {
        let body_as_bytes = convert_body_to_bytes(req.into_body()).await?;

        let value = deseralise_body(&body_as_bytes).unwrap_or_default();

        Ok(LenientJson(value))
    }
}

async fn convert_body_to_bytes(body: Body) -> Result<Bytes, AppError> {
    axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| {
            tracing::error!("Error converting body to bytes: {err}");
            AppError::InvalidInput("Error reading body".to_string())
        })
}

fn deseralise_body<T>(body: &Bytes) -> Option<T>
where
    T: DeserializeOwned,
{
    let deserializer = &mut serde_json::Deserializer::from_slice(body);

    serde_path_to_error::deserialize(deserializer)
        .inspect_err(|err| tracing::warn!("Error deserialising body: {err}"))
        .ok()
}
