//! In-process store. Each operation runs under a single lock, so favorite inserts are
//! check-and-write atomic just like the PostgreSQL `ON CONFLICT` path.

use super::{InsertOutcome, Store};
use crate::error::AppError;
use crate::model::{
    Character, Favorite, FavoriteTarget, NewCharacter, NewPlanet, NewUser, Planet, Reference, User,
};
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    characters: Vec<Character>,
    planets: Vec<Planet>,
    favorites: Vec<Favorite>,
    last_user_id: i32,
    last_character_id: i32,
    last_planet_id: i32,
    last_favorite_id: i32,
}

impl Tables {
    fn has_target(&self, target: FavoriteTarget) -> bool {
        match target {
            FavoriteTarget::Character(id) => self.characters.iter().any(|c| c.id == id),
            FavoriteTarget::Planet(id) => self.planets.iter().any(|p| p.id == id),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn close(&self) {}

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.users.clone())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome<User>, AppError> {
        let mut tables = self.write()?;
        let taken = tables
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Ok(InsertOutcome::Conflict);
        }
        tables.last_user_id += 1;
        let user = user.into_user(tables.last_user_id);
        tables.users.push(user.clone());
        Ok(InsertOutcome::Inserted(user))
    }

    async fn list_characters(&self) -> Result<Vec<Character>, AppError> {
        Ok(self.read()?.characters.clone())
    }

    async fn find_character(&self, id: i32) -> Result<Option<Character>, AppError> {
        Ok(self.read()?.characters.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_character(&self, character: NewCharacter) -> Result<Character, AppError> {
        let mut tables = self.write()?;
        tables.last_character_id += 1;
        let character = character.into_character(tables.last_character_id);
        tables.characters.push(character.clone());
        Ok(character)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        Ok(self.read()?.planets.clone())
    }

    async fn find_planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        Ok(self.read()?.planets.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_planet(&self, planet: NewPlanet) -> Result<Planet, AppError> {
        let mut tables = self.write()?;
        tables.last_planet_id += 1;
        let planet = planet.into_planet(tables.last_planet_id);
        tables.planets.push(planet.clone());
        Ok(planet)
    }

    async fn list_favorites(&self, user_id: i32) -> Result<Vec<Favorite>, AppError> {
        Ok(self
            .read()?
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<InsertOutcome<Favorite>, AppError> {
        let mut tables = self.write()?;
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Ok(InsertOutcome::MissingReference(Reference::User));
        }
        if !tables.has_target(target) {
            return Ok(InsertOutcome::MissingReference(target.reference()));
        }
        if tables.favorites.iter().any(|f| f.matches(user_id, target)) {
            return Ok(InsertOutcome::Conflict);
        }
        tables.last_favorite_id += 1;
        let favorite = Favorite::new(tables.last_favorite_id, user_id, target);
        tables.favorites.push(favorite.clone());
        Ok(InsertOutcome::Inserted(favorite))
    }

    async fn delete_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<Option<Favorite>, AppError> {
        let mut tables = self.write()?;
        let position = tables
            .favorites
            .iter()
            .position(|f| f.matches(user_id, target));
        Ok(position.map(|i| tables.favorites.remove(i)))
    }
}
