use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use starwars_api::model::{NewCharacter, NewPlanet};
use starwars_api::{app, AppState, MemoryStore, Store};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

/// Store with people 1..=3 and planets 1..=3, and no users.
async fn catalog_state() -> AppState {
    let store = MemoryStore::new();
    for name in ["Luke Skywalker", "Leia Organa", "Han Solo"] {
        store.insert_character(NewCharacter::named(name)).await.unwrap();
    }
    for name in ["Tatooine", "Alderaan", "Hoth"] {
        store.insert_planet(NewPlanet::named(name)).await.unwrap();
    }
    AppState::new(store)
}

async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app(state.clone(), BODY_LIMIT).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn signup(state: &AppState, username: &str) -> Value {
    let (status, user) = send(
        state,
        Method::POST,
        "/user",
        Some(json!({
            "username": username,
            "email": format!("{username}@rebellion.org"),
            "password": "may the force"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

#[tokio::test]
async fn signup_returns_user_without_password() {
    let state = catalog_state().await;
    let user = signup(&state, "luke").await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["username"], "luke");
    assert_eq!(user["email"], "luke@rebellion.org");
    assert_eq!(user["is_active"], true);
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let (status, users) = send(&state, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users, json!([user]));
}

#[tokio::test]
async fn signup_lists_all_missing_fields() {
    let state = catalog_state().await;
    let (status, body) = send(&state, Method::POST, "/user", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing"], json!(["username", "email", "password"]));
    assert_eq!(body["msg"], "Missing required fields: username, email, password");

    let (status, body) = send(
        &state,
        Method::POST,
        "/user",
        Some(json!({ "username": "han", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing"], json!(["email"]));

    let (_, users) = send(&state, Method::GET, "/users", None).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn signup_without_body_is_bad_request() {
    let state = catalog_state().await;
    let (status, body) = send(&state, Method::POST, "/user", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().starts_with("Request body must be valid JSON"));
}

#[tokio::test]
async fn signup_accepts_any_nonblank_email() {
    let state = catalog_state().await;
    let (status, user) = send(
        &state,
        Method::POST,
        "/user",
        Some(json!({ "username": "chewie", "email": "abc", "password": "rrwwgg" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "abc");
}

#[tokio::test]
async fn oversized_body_is_json_413() {
    let state = catalog_state().await;
    let body = json!({ "username": "x".repeat(256), "email": "e", "password": "p" }).to_string();

    // Declared length over the limit is refused before the handler runs.
    let req = Request::builder()
        .method(Method::POST)
        .uri("/user")
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body.clone()))
        .unwrap();
    let resp = app(state.clone(), 64).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({ "msg": "Request body too large" }));

    // Undeclared length trips the limit while the body is read.
    let req = Request::builder()
        .method(Method::POST)
        .uri("/user")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app(state.clone(), 64).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({ "msg": "Request body too large" }));

    let (_, users) = send(&state, Method::GET, "/users", None).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn signup_with_taken_username_is_rejected() {
    let state = catalog_state().await;
    signup(&state, "leia").await;
    let (status, body) = send(
        &state,
        Method::POST,
        "/user",
        Some(json!({ "username": "leia", "email": "other@alderaan.gov", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "User already exists" }));
}

#[tokio::test]
async fn unknown_user_is_404() {
    let state = catalog_state().await;
    let (status, body) = send(&state, Method::GET, "/user/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "User not found" }));
}

#[tokio::test]
async fn catalog_lookups() {
    let state = catalog_state().await;

    let (status, people) = send(&state, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(people.as_array().unwrap().len(), 3);

    let (status, person) = send(&state, Method::GET, "/character/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(person["name"], "Leia Organa");
    assert_eq!(person["gender"], Value::Null);

    let (status, body) = send(&state, Method::GET, "/character/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Person not found" }));

    let (status, planet) = send(&state, Method::GET, "/planet/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(planet["name"], "Hoth");

    let (status, body) = send(&state, Method::GET, "/planet/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Planet not found" }));
}

#[tokio::test]
async fn empty_collections_are_ok() {
    let state = AppState::new(MemoryStore::new());
    for uri in ["/users", "/people", "/planets", "/user/1/favorites"] {
        let (status, body) = send(&state, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }
}

#[tokio::test]
async fn planet_favorite_twice_is_duplicate() {
    let state = catalog_state().await;
    for name in ["u1", "u2", "u3", "u4", "u5"] {
        signup(&state, name).await;
    }

    let (status, fav) = send(&state, Method::POST, "/user/5/favorite/planet/3", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fav["user_id"], 5);
    assert_eq!(fav["planet_id"], 3);
    assert_eq!(fav["character_id"], Value::Null);

    let (status, body) = send(&state, Method::POST, "/user/5/favorite/planet/3", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "Planet already in favorites" }));

    let (_, favorites) = send(&state, Method::GET, "/user/5/favorites", None).await;
    assert_eq!(favorites, json!([fav]));
}

#[tokio::test]
async fn character_favorite_round_trip() {
    let state = catalog_state().await;
    signup(&state, "chewie").await;

    let (status, fav) = send(&state, Method::POST, "/user/1/favorite/character/3", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, favorites) = send(&state, Method::GET, "/user/1/favorites", None).await;
    assert!(favorites.as_array().unwrap().contains(&fav));

    let (status, body) = send(&state, Method::POST, "/user/1/favorite/character/3", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "Character already in favorites" }));

    let (status, body) = send(&state, Method::DELETE, "/user/1/favorite/character/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Favorite character deleted" }));

    let (_, favorites) = send(&state, Method::GET, "/user/1/favorites", None).await;
    assert_eq!(favorites, json!([]));

    let (status, body) = send(&state, Method::DELETE, "/user/1/favorite/character/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Favorite character not found" }));
}

#[tokio::test]
async fn deleting_missing_planet_favorite_leaves_others() {
    let state = catalog_state().await;
    signup(&state, "wedge").await;
    let (_, fav) = send(&state, Method::POST, "/user/1/favorite/character/1", None).await;

    let (status, body) = send(&state, Method::DELETE, "/user/1/favorite/planet/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Favorite planet not found" }));

    let (_, favorites) = send(&state, Method::GET, "/user/1/favorites", None).await;
    assert_eq!(favorites, json!([fav]));
}

#[tokio::test]
async fn favorite_for_unknown_user_or_target_is_404() {
    let state = catalog_state().await;
    let (status, body) = send(&state, Method::POST, "/user/7/favorite/planet/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "User not found" }));

    signup(&state, "biggs").await;
    let (status, body) = send(&state, Method::POST, "/user/1/favorite/planet/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Planet not found" }));
}

#[tokio::test]
async fn trailing_slashes_are_ignored() {
    let state = catalog_state().await;
    signup(&state, "ackbar").await;

    let (status, people) = send(&state, Method::GET, "/people/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(people.as_array().unwrap().len(), 3);

    let (status, _) = send(&state, Method::POST, "/user/1/favorite/planet/2/", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, favorites) = send(&state, Method::GET, "/user/1/favorites/", None).await;
    assert_eq!(favorites.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_numeric_ids_and_unknown_routes_are_json_404() {
    let state = catalog_state().await;
    let (status, body) = send(&state, Method::GET, "/user/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Not found" }));

    let (status, body) = send(&state, Method::GET, "/starships", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Not found" }));
}

#[tokio::test]
async fn ids_beyond_key_range_get_route_messages() {
    let state = catalog_state().await;
    signup(&state, "bodhi").await;

    let cases = [
        (Method::GET, "/user/2147483648", "User not found"),
        (Method::GET, "/character/99999999999999999999", "Person not found"),
        (Method::GET, "/planet/2147483648", "Planet not found"),
        (Method::POST, "/user/2147483648/favorite/planet/1", "User not found"),
        (Method::POST, "/user/1/favorite/character/2147483648", "Person not found"),
        (Method::POST, "/user/1/favorite/planet/9999999999", "Planet not found"),
        (Method::DELETE, "/user/1/favorite/planet/9999999999", "Favorite planet not found"),
        (Method::DELETE, "/user/9999999999/favorite/character/1", "Favorite character not found"),
    ];
    for (method, uri, msg) in cases {
        let (status, body) = send(&state, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "msg": msg }), "{uri}");
    }

    let (status, body) = send(&state, Method::GET, "/user/2147483648/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert!(state.store().list_favorites(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let state = catalog_state().await;
    let req = Request::builder()
        .method(Method::PUT)
        .uri("/users")
        .body(Body::empty())
        .unwrap();
    let resp = app(state.clone(), BODY_LIMIT).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(resp.headers()["allow"].to_str().unwrap().contains("GET"));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({ "msg": "Method not allowed" }));

    let (status, body) = send(&state, Method::GET, "/user/1/favorite/planet/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "msg": "Method not allowed" }));
}

#[tokio::test]
async fn operational_endpoints() {
    let state = catalog_state().await;
    let (status, body) = send(&state, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(&state, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "ok" }));

    let (status, body) = send(&state, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "starwars-api");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_adds_create_one_favorite() {
    let state = catalog_state().await;
    signup(&state, "jyn").await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            send(&state, Method::POST, "/user/1/favorite/character/1", None).await.0
        }));
    }
    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count(), 7);

    let favorites = state.store().list_favorites(1).await.unwrap();
    assert_eq!(favorites.len(), 1);
}
