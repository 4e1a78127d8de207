// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use super::error::HttpError;

/// A caller whose bearer token verified successfully.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = parts
            .extensions
            .get::<HttpState>()
            .cloned()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::infrastructure(
                    "application state missing",
                ))
            })?;

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(
                    "missing Authorization header",
                ))
            })?;

        let user = app_state
            .services
            .token_manager()
            .authenticate(header.token())
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(user))
    }
}

/// `Query` whose rejection is reported as an `ErrorResponse`. Timestamps must
/// be RFC 3339; a `+hh:mm` offset has to be sent as `%2B` because a bare `+`
/// decodes to a space.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::rejected(rejection.status(), rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `Path` whose rejection is reported as an `ErrorResponse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::rejected(rejection.status(), rejection.body_text()))?;
        Ok(Self(value))
    }
}
