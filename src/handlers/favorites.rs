//! Favorite handlers: list, and add/remove per target kind.

use crate::error::AppError;
use crate::extractors::{ApiPath, RecordId};
use crate::model::{Favorite, FavoriteTarget, Reference};
use crate::response::{created, message, ok};
use crate::service::FavoritesService;
use crate::state::AppState;
use axum::extract::State;

/// GET /user/:user_id/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<RecordId>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let favorites = match user_id.get() {
        Some(user_id) => FavoritesService::list(state.store(), user_id).await?,
        None => Vec::<Favorite>::new(),
    };
    Ok(ok(favorites))
}

macro_rules! favorite_handlers {
    ($add:ident, $remove:ident, $target:path, $kind:expr) => {
        pub async fn $add(
            State(state): State<AppState>,
            ApiPath((user_id, target_id)): ApiPath<(RecordId, RecordId)>,
        ) -> Result<impl axum::response::IntoResponse, AppError> {
            let user_id = user_id.or_not_found(Reference::User.not_found_message())?;
            let target_id = target_id.or_not_found($kind.not_found_message())?;
            let favorite = FavoritesService::add(state.store(), user_id, $target(target_id)).await?;
            Ok(created(favorite))
        }

        pub async fn $remove(
            State(state): State<AppState>,
            ApiPath((user_id, target_id)): ApiPath<(RecordId, RecordId)>,
        ) -> Result<impl axum::response::IntoResponse, AppError> {
            let missing = $kind.missing_favorite_message();
            let user_id = user_id.or_not_found(missing)?;
            let target = $target(target_id.or_not_found(missing)?);
            FavoritesService::remove(state.store(), user_id, target).await?;
            Ok(message(target.deleted_message()))
        }
    };
}

favorite_handlers!(
    add_favorite_character,
    remove_favorite_character,
    FavoriteTarget::Character,
    Reference::Character
);
favorite_handlers!(
    add_favorite_planet,
    remove_favorite_planet,
    FavoriteTarget::Planet,
    Reference::Planet
);
