//! Extractors whose rejections are `AppError`s, so every failure answers with a JSON `msg`.

mod json;
mod path;

pub use json::ApiJson;
pub use path::{ApiPath, RecordId};
