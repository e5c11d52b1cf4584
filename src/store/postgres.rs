//! PostgreSQL store: table bootstrap DDL and queries.

use super::{InsertOutcome, Store};
use crate::error::AppError;
use crate::model::{
    Character, Favorite, FavoriteTarget, NewCharacter, NewPlanet, NewUser, Planet, Reference, User,
};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const FAVORITES_USER_FK: &str = "favorites_user_id_fkey";
const FAVORITES_CHARACTER_FK: &str = "favorites_character_id_fkey";
const FAVORITES_PLANET_FK: &str = "favorites_planet_id_fkey";

const USER_COLUMNS: &str = "id, username, email, password_hash, is_active";
const CHARACTER_COLUMNS: &str = "id, name, gender, birth_year, height, eye_color, hair_color";
const PLANET_COLUMNS: &str = "id, name, climate, terrain, population, diameter, gravity";
const FAVORITE_COLUMNS: &str = "id, user_id, character_id, planet_id";

/// Create tables and indexes if they do not exist. Safe to run on every start.
/// Favorite uniqueness lives in the partial unique indexes, not in application code.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username VARCHAR(120) NOT NULL UNIQUE,
            email VARCHAR(120) NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#
        .to_string(),
        r#"
        CREATE TABLE IF NOT EXISTS characters (
            id SERIAL PRIMARY KEY,
            name VARCHAR(250) NOT NULL,
            gender VARCHAR(50),
            birth_year VARCHAR(50),
            height VARCHAR(50),
            eye_color VARCHAR(50),
            hair_color VARCHAR(50)
        )
        "#
        .to_string(),
        r#"
        CREATE TABLE IF NOT EXISTS planets (
            id SERIAL PRIMARY KEY,
            name VARCHAR(250) NOT NULL,
            climate VARCHAR(250),
            terrain VARCHAR(250),
            population VARCHAR(50),
            diameter VARCHAR(50),
            gravity VARCHAR(50)
        )
        "#
        .to_string(),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                id SERIAL PRIMARY KEY,
                user_id INTEGER NOT NULL,
                character_id INTEGER,
                planet_id INTEGER,
                CONSTRAINT {FAVORITES_USER_FK} FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE,
                CONSTRAINT {FAVORITES_CHARACTER_FK} FOREIGN KEY (character_id) REFERENCES characters (id) ON DELETE CASCADE,
                CONSTRAINT {FAVORITES_PLANET_FK} FOREIGN KEY (planet_id) REFERENCES planets (id) ON DELETE CASCADE,
                CONSTRAINT favorites_single_target CHECK (num_nonnulls(character_id, planet_id) = 1)
            )
            "#
        ),
        "CREATE UNIQUE INDEX IF NOT EXISTS favorites_user_character_key ON favorites (user_id, character_id) WHERE character_id IS NOT NULL".to_string(),
        "CREATE UNIQUE INDEX IF NOT EXISTS favorites_user_planet_key ON favorites (user_id, planet_id) WHERE planet_id IS NOT NULL".to_string(),
    ];
    for ddl in &statements {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("tables ensured");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the database if needed, open a pool and bootstrap tables.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        ensure_database_exists(database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        ensure_tables(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn missing_reference(constraint: Option<&str>) -> Reference {
    match constraint {
        Some(FAVORITES_CHARACTER_FK) => Reference::Character,
        Some(FAVORITES_PLANET_FK) => Reference::Planet,
        _ => Reference::User,
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome<User>, AppError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, is_active) VALUES ($1, $2, $3, TRUE) \
             ON CONFLICT DO NOTHING RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, username = %user.username, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map_or(InsertOutcome::Conflict, InsertOutcome::Inserted))
    }

    async fn list_characters(&self) -> Result<Vec<Character>, AppError> {
        let sql = format!("SELECT {} FROM characters ORDER BY id", CHARACTER_COLUMNS);
        Ok(sqlx::query_as::<_, Character>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_character(&self, id: i32) -> Result<Option<Character>, AppError> {
        let sql = format!("SELECT {} FROM characters WHERE id = $1", CHARACTER_COLUMNS);
        Ok(sqlx::query_as::<_, Character>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_character(&self, character: NewCharacter) -> Result<Character, AppError> {
        let sql = format!(
            "INSERT INTO characters (name, gender, birth_year, height, eye_color, hair_color) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            CHARACTER_COLUMNS
        );
        Ok(sqlx::query_as::<_, Character>(&sql)
            .bind(&character.name)
            .bind(&character.gender)
            .bind(&character.birth_year)
            .bind(&character.height)
            .bind(&character.eye_color)
            .bind(&character.hair_color)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        let sql = format!("SELECT {} FROM planets ORDER BY id", PLANET_COLUMNS);
        Ok(sqlx::query_as::<_, Planet>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        let sql = format!("SELECT {} FROM planets WHERE id = $1", PLANET_COLUMNS);
        Ok(sqlx::query_as::<_, Planet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_planet(&self, planet: NewPlanet) -> Result<Planet, AppError> {
        let sql = format!(
            "INSERT INTO planets (name, climate, terrain, population, diameter, gravity) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            PLANET_COLUMNS
        );
        Ok(sqlx::query_as::<_, Planet>(&sql)
            .bind(&planet.name)
            .bind(&planet.climate)
            .bind(&planet.terrain)
            .bind(&planet.population)
            .bind(&planet.diameter)
            .bind(&planet.gravity)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_favorites(&self, user_id: i32) -> Result<Vec<Favorite>, AppError> {
        let sql = format!("SELECT {} FROM favorites WHERE user_id = $1", FAVORITE_COLUMNS);
        Ok(sqlx::query_as::<_, Favorite>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<InsertOutcome<Favorite>, AppError> {
        let sql = format!(
            "INSERT INTO favorites (user_id, character_id, planet_id) VALUES ($1, $2, $3) \
             ON CONFLICT DO NOTHING RETURNING {}",
            FAVORITE_COLUMNS
        );
        tracing::debug!(sql = %sql, user_id, ?target, "query");
        let result = sqlx::query_as::<_, Favorite>(&sql)
            .bind(user_id)
            .bind(target.character_id())
            .bind(target.planet_id())
            .fetch_optional(&self.pool)
            .await;
        match result {
            Ok(Some(favorite)) => Ok(InsertOutcome::Inserted(favorite)),
            Ok(None) => Ok(InsertOutcome::Conflict),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Ok(
                InsertOutcome::MissingReference(missing_reference(db.constraint())),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<Option<Favorite>, AppError> {
        let id = match target {
            FavoriteTarget::Character(id) | FavoriteTarget::Planet(id) => id,
        };
        let sql = format!(
            "DELETE FROM favorites WHERE user_id = $1 AND {} = $2 RETURNING {}",
            target.column(),
            FAVORITE_COLUMNS
        );
        tracing::debug!(sql = %sql, user_id, ?target, "query");
        Ok(sqlx::query_as::<_, Favorite>(&sql)
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}
