//! Request extractors that reject with the JSON error body
//!
//! Wrappers around axum's `Json`, `Path` and `Query`. Malformed bodies,
//! path segments and query strings become a [`SignMeUpError`] instead of
//! axum's plain-text rejection.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use crate::utils::errors::SignMeUpError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Typed path parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

/// Typed query string
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = SignMeUpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(from_json_rejection(rejection)),
        }
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = SignMeUpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(from_path_rejection(rejection)),
        }
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = SignMeUpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(from_query_rejection(rejection)),
        }
    }
}

fn from_json_rejection(rejection: JsonRejection) -> SignMeUpError {
    let message = rejection.body_text();
    // well-formed JSON of the wrong shape is a validation failure
    if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
        SignMeUpError::Validation(message)
    } else {
        SignMeUpError::InvalidInput(message)
    }
}

fn from_path_rejection(rejection: PathRejection) -> SignMeUpError {
    SignMeUpError::InvalidInput(rejection.body_text())
}

fn from_query_rejection(rejection: QueryRejection) -> SignMeUpError {
    SignMeUpError::InvalidInput(rejection.body_text())
}
