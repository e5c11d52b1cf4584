//! Star Wars blog API: users, people, planets and per-user favorites over JSON/HTTP.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod password;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use model::{Character, Favorite, FavoriteTarget, Planet, User};
pub use routes::{api_routes, app, common_routes_with_ready};
pub use seed::{apply_seed, load_seed};
pub use service::{CatalogService, FavoritesService, UserService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, InsertOutcome, MemoryStore, PgStore, Store};
