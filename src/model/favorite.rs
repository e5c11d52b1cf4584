//! Favorite association between a user and exactly one person or planet.

use serde::Serialize;

/// What a favorite points at. Exactly one target per favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    Character(i32),
    Planet(i32),
}

impl FavoriteTarget {
    pub fn character_id(&self) -> Option<i32> {
        match self {
            FavoriteTarget::Character(id) => Some(*id),
            FavoriteTarget::Planet(_) => None,
        }
    }

    pub fn planet_id(&self) -> Option<i32> {
        match self {
            FavoriteTarget::Planet(id) => Some(*id),
            FavoriteTarget::Character(_) => None,
        }
    }

    /// Column holding this target's id in the `favorites` table.
    pub fn column(&self) -> &'static str {
        match self {
            FavoriteTarget::Character(_) => "character_id",
            FavoriteTarget::Planet(_) => "planet_id",
        }
    }

    /// The referenced record kind, used when the target does not exist.
    pub fn reference(&self) -> Reference {
        match self {
            FavoriteTarget::Character(_) => Reference::Character,
            FavoriteTarget::Planet(_) => Reference::Planet,
        }
    }

    pub fn duplicate_message(&self) -> &'static str {
        match self {
            FavoriteTarget::Character(_) => "Character already in favorites",
            FavoriteTarget::Planet(_) => "Planet already in favorites",
        }
    }

    pub fn missing_message(&self) -> &'static str {
        self.reference().missing_favorite_message()
    }

    pub fn deleted_message(&self) -> &'static str {
        match self {
            FavoriteTarget::Character(_) => "Favorite character deleted",
            FavoriteTarget::Planet(_) => "Favorite planet deleted",
        }
    }
}

/// A record a favorite refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    User,
    Character,
    Planet,
}

impl Reference {
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Reference::User => "User not found",
            Reference::Character => "Person not found",
            Reference::Planet => "Planet not found",
        }
    }

    /// Message for removing a favorite of this kind that does not exist.
    pub fn missing_favorite_message(&self) -> &'static str {
        match self {
            Reference::User => "Favorite not found",
            Reference::Character => "Favorite character not found",
            Reference::Planet => "Favorite planet not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub character_id: Option<i32>,
    pub planet_id: Option<i32>,
}

impl Favorite {
    pub fn new(id: i32, user_id: i32, target: FavoriteTarget) -> Self {
        Favorite {
            id,
            user_id,
            character_id: target.character_id(),
            planet_id: target.planet_id(),
        }
    }

    /// `None` only for rows written outside this service with neither target set.
    pub fn target(&self) -> Option<FavoriteTarget> {
        match (self.character_id, self.planet_id) {
            (Some(id), _) => Some(FavoriteTarget::Character(id)),
            (None, Some(id)) => Some(FavoriteTarget::Planet(id)),
            (None, None) => None,
        }
    }

    pub fn matches(&self, user_id: i32, target: FavoriteTarget) -> bool {
        self.user_id == user_id && self.target() == Some(target)
    }
}
