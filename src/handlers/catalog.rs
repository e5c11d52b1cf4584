//! Read-only catalog handlers: people and planets.

use crate::error::AppError;
use crate::extractors::{ApiPath, RecordId};
use crate::model::Reference;
use crate::response::ok;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::extract::State;

/// GET /people
pub async fn list_people(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    Ok(ok(CatalogService::list_characters(state.store()).await?))
}

/// GET /character/:character_id
pub async fn get_character(
    State(state): State<AppState>,
    ApiPath(character_id): ApiPath<RecordId>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let character_id = character_id.or_not_found(Reference::Character.not_found_message())?;
    Ok(ok(CatalogService::get_character(state.store(), character_id).await?))
}

/// GET /planets
pub async fn list_planets(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    Ok(ok(CatalogService::list_planets(state.store()).await?))
}

/// GET /planet/:planet_id
pub async fn get_planet(
    State(state): State<AppState>,
    ApiPath(planet_id): ApiPath<RecordId>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let planet_id = planet_id.or_not_found(Reference::Planet.not_found_message())?;
    Ok(ok(CatalogService::get_planet(state.store(), planet_id).await?))
}
