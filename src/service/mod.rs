//! Operations behind the HTTP handlers, written against the `Store` trait.

mod catalog;
mod favorites;
mod users;
mod validation;
pub use catalog::CatalogService;
pub use favorites::FavoritesService;
pub use users::UserService;
pub use validation::{CreateUserRequest, RequestValidator, ValidationErrors};
