use serde::{Deserialize, Serialize};

/// A person from the catalog, served at `/people` and `/character/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
}

impl NewCharacter {
    pub fn named(name: impl Into<String>) -> Self {
        NewCharacter {
            name: name.into(),
            gender: None,
            birth_year: None,
            height: None,
            eye_color: None,
            hair_color: None,
        }
    }

    pub fn into_character(self, id: i32) -> Character {
        Character {
            id,
            name: self.name,
            gender: self.gender,
            birth_year: self.birth_year,
            height: self.height,
            eye_color: self.eye_color,
            hair_color: self.hair_color,
        }
    }
}
