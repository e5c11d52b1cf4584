//! Read-only lookups for people and planets.

use crate::error::AppError;
use crate::model::{Character, Planet, Reference};
use crate::store::Store;

pub struct CatalogService;

impl CatalogService {
    pub async fn list_characters(store: &dyn Store) -> Result<Vec<Character>, AppError> {
        store.list_characters().await
    }

    pub async fn get_character(store: &dyn Store, id: i32) -> Result<Character, AppError> {
        store
            .find_character(id)
            .await?
            .ok_or_else(|| AppError::NotFound(Reference::Character.not_found_message().into()))
    }

    pub async fn list_planets(store: &dyn Store) -> Result<Vec<Planet>, AppError> {
        store.list_planets().await
    }

    pub async fn get_planet(store: &dyn Store, id: i32) -> Result<Planet, AppError> {
        store
            .find_planet(id)
            .await?
            .ok_or_else(|| AppError::NotFound(Reference::Planet.not_found_message().into()))
    }
}
