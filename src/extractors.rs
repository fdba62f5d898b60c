use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// JSON extractor that renders rejections as the service's structured error
/// body instead of axum's plain-text default.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let body = RestError::with_errors(
                    "request body cannot be parsed",
                    vec![rejection.body_text()],
                );
                Err((StatusCode::BAD_REQUEST, Json(body)).into_response())
            }
        }
    }
}
