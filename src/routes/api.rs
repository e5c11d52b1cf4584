//! Users, catalog and favorites routes.

use crate::handlers::{
    add_favorite_character, add_favorite_planet, create_user, get_character, get_planet, get_user,
    list_favorites, list_people, list_planets, list_users, remove_favorite_character,
    remove_favorite_planet,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/user", post(create_user))
        .route("/user/:user_id", get(get_user))
        .route("/people", get(list_people))
        .route("/character/:character_id", get(get_character))
        .route("/planets", get(list_planets))
        .route("/planet/:planet_id", get(get_planet))
        .route("/user/:user_id/favorites", get(list_favorites))
        .route(
            "/user/:user_id/favorite/character/:character_id",
            post(add_favorite_character).delete(remove_favorite_character),
        )
        .route(
            "/user/:user_id/favorite/planet/:planet_id",
            post(add_favorite_planet).delete(remove_favorite_planet),
        )
        .with_state(state)
}
