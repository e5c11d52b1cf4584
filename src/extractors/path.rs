//! Path parameters. A segment that does not parse (e.g. `/user/abc`) does not match a
//! route, so it answers 404 rather than 400.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;

#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, path = %parts.uri.path(), "path rejected");
                Err(AppError::NotFound("Not found".into()))
            }
        }
    }
}

/// Integer id segment. Any run of digits matches the route; ids that do not fit a
/// stored key name no record, so the handler answers with its own not-found message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(Option<i32>);

impl RecordId {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(RecordId(raw.parse::<i32>().ok()))
    }

    /// The stored key, if the id can name one.
    pub fn get(self) -> Option<i32> {
        self.0
    }

    pub fn or_not_found(self, msg: &str) -> Result<i32, AppError> {
        self.0.ok_or_else(|| AppError::NotFound(msg.to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RecordId::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid id: {raw}")))
    }
}
