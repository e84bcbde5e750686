//! Request body extractor that reports bad JSON in the API's error shape.
//!
//! `axum::Json` rejects with plain-text 415 / 422 responses. [`AppJson`]
//! runs the same extraction and turns every rejection into a 400
//! `BAD_REQUEST` body like the rest of the API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Use in place of `axum::Json` as the last handler argument.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> AppError {
    tracing::debug!(status = %rejection.status(), error = %rejection.body_text(), "Rejected JSON body");
    AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
}
