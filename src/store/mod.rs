//! Persistence seam. `PgStore` is the production backend; `MemoryStore` backs tests and
//! local runs without `DATABASE_URL`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};

use crate::error::AppError;
use crate::model::{
    Character, Favorite, FavoriteTarget, NewCharacter, NewPlanet, NewUser, Planet, Reference, User,
};
use async_trait::async_trait;

/// Result of an atomic insert guarded by uniqueness and foreign keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    Inserted(T),
    /// A row with the same unique key already exists; nothing was written.
    Conflict,
    /// A referenced row does not exist; nothing was written.
    MissingReference(Reference),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;

    /// Release connections. The store must not be used afterwards.
    async fn close(&self);

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError>;
    /// Conflict when the username or email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome<User>, AppError>;

    async fn list_characters(&self) -> Result<Vec<Character>, AppError>;
    async fn find_character(&self, id: i32) -> Result<Option<Character>, AppError>;
    async fn insert_character(&self, character: NewCharacter) -> Result<Character, AppError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;
    async fn find_planet(&self, id: i32) -> Result<Option<Planet>, AppError>;
    async fn insert_planet(&self, planet: NewPlanet) -> Result<Planet, AppError>;

    async fn list_favorites(&self, user_id: i32) -> Result<Vec<Favorite>, AppError>;
    /// Insert-or-report-conflict on `(user_id, target)`. Check and write are one atomic step.
    async fn insert_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<InsertOutcome<Favorite>, AppError>;
    /// Returns the deleted row, or `None` when no favorite matched.
    async fn delete_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<Option<Favorite>, AppError>;
}
