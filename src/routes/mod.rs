//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes_with_ready;

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// Gives the router's own bodiless 405 and the body limit's plain 413 a JSON `msg`.
async fn json_error_bodies(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if is_json {
        return response;
    }
    let error = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => AppError::MethodNotAllowed,
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => return response,
    };
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = error.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

/// Full application: all routes, JSON 404 fallback, CORS, tracing and a body limit.
/// Trailing slashes are trimmed before routing, so `/users/` serves `/users`.
pub fn app(state: AppState, body_limit: usize) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(api_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn(json_error_bodies))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
