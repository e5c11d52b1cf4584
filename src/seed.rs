//! Startup seeding of the read-only catalog from JSON files.

use crate::error::AppError;
use crate::model::{NewCharacter, NewPlanet};
use crate::store::Store;
use serde::de::DeserializeOwned;
use std::path::Path;

pub const PEOPLE_FILE: &str = "people.json";
pub const PLANETS_FILE: &str = "planets.json";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub people: Vec<NewCharacter>,
    pub planets: Vec<NewPlanet>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub people: usize,
    pub planets: usize,
}

/// Read `people.json` and `planets.json` from `dir`. A missing file seeds nothing.
pub async fn load_seed(dir: &Path) -> Result<SeedData, AppError> {
    Ok(SeedData {
        people: read_seed_file(&dir.join(PEOPLE_FILE)).await?,
        planets: read_seed_file(&dir.join(PLANETS_FILE)).await?,
    })
}

async fn read_seed_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no seed file");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(AppError::Internal(format!("read {}: {}", path.display(), e)));
        }
    };
    serde_json::from_str(&content)
        .map_err(|e| AppError::BadRequest(format!("invalid {}: {}", path.display(), e)))
}

/// Insert seed rows. Each kind is seeded only while the store holds none of it, so
/// restarting with the same seed does not duplicate rows.
pub async fn apply_seed(store: &dyn Store, seed: SeedData) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();
    if !seed.people.is_empty() && store.list_characters().await?.is_empty() {
        for person in seed.people {
            store.insert_character(person).await?;
            report.people += 1;
        }
    }
    if !seed.planets.is_empty() && store.list_planets().await?.is_empty() {
        for planet in seed.planets {
            store.insert_planet(planet).await?;
            report.planets += 1;
        }
    }
    tracing::info!(people = report.people, planets = report.planets, "catalog seeded");
    Ok(report)
}
