//! Response helpers. Bodies are the serialized records themselves, no envelope.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// `{"msg": "..."}` confirmation body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub msg: String,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn message(msg: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { msg: msg.into() }))
}
