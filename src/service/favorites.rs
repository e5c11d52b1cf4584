//! Favorites manager. Uniqueness of `(user, target)` is delegated to the store's atomic
//! insert-or-conflict, so a lost race surfaces as the same duplicate error as a
//! sequential repeat.

use crate::error::AppError;
use crate::model::{Favorite, FavoriteTarget};
use crate::store::{InsertOutcome, Store};

pub struct FavoritesService;

impl FavoritesService {
    /// All favorites of a user in store order. Unknown users have none.
    pub async fn list(store: &dyn Store, user_id: i32) -> Result<Vec<Favorite>, AppError> {
        store.list_favorites(user_id).await
    }

    /// Add a favorite. Fails with `DuplicateFavorite` when the pair exists and with
    /// `NotFound` when the user or target does not; neither case writes anything.
    pub async fn add(
        store: &dyn Store,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<Favorite, AppError> {
        match store.insert_favorite(user_id, target).await? {
            InsertOutcome::Inserted(favorite) => {
                tracing::info!(user_id, favorite_id = favorite.id, ?target, "favorite added");
                Ok(favorite)
            }
            InsertOutcome::Conflict => {
                tracing::debug!(user_id, ?target, "favorite already present");
                Err(AppError::DuplicateFavorite(target.duplicate_message().into()))
            }
            InsertOutcome::MissingReference(reference) => {
                Err(AppError::NotFound(reference.not_found_message().into()))
            }
        }
    }

    /// Remove a favorite, returning the deleted record.
    pub async fn remove(
        store: &dyn Store,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<Favorite, AppError> {
        let deleted = store
            .delete_favorite(user_id, target)
            .await?
            .ok_or_else(|| AppError::NotFound(target.missing_message().into()))?;
        tracing::info!(user_id, favorite_id = deleted.id, ?target, "favorite removed");
        Ok(deleted)
    }
}
