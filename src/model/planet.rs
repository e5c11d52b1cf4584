use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
    pub diameter: Option<String>,
    pub gravity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
    pub diameter: Option<String>,
    pub gravity: Option<String>,
}

impl NewPlanet {
    pub fn named(name: impl Into<String>) -> Self {
        NewPlanet {
            name: name.into(),
            climate: None,
            terrain: None,
            population: None,
            diameter: None,
            gravity: None,
        }
    }

    pub fn into_planet(self, id: i32) -> Planet {
        Planet {
            id,
            name: self.name,
            climate: self.climate,
            terrain: self.terrain,
            population: self.population,
            diameter: self.diameter,
            gravity: self.gravity,
        }
    }
}
