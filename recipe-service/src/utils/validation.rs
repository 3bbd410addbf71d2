//! Extractors that deserialize and validate in one step.
//!
//! Every rejection is an `AppError`, so malformed input gets the same JSON
//! error body as any other failure. Bodies that are not JSON at all are a
//! 400. JSON or query strings with wrong or missing fields are a 422.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::Validate;

pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = validate_json(Json::<T>::from_request(req, state).await)?;
        Ok(ValidatedJson(value))
    }
}

pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

/// Validate a body that the handler extracted itself.
///
/// Handlers that must check something else first (such as AI configuration)
/// take `Result<Json<T>, JsonRejection>` and call this afterwards.
pub fn validate_json<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    let Json(value) = payload.map_err(json_rejection)?;
    value.validate()?;
    Ok(value)
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => AppError::InvalidRequest(err.body_text()),
        other => AppError::BadRequest(anyhow::anyhow!(other.body_text())),
    }
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::InvalidRequest(rejection.body_text())
}
