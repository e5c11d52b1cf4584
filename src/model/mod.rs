//! Domain records: users, people, planets and favorites.

mod character;
mod favorite;
mod planet;
mod user;

pub use character::{Character, NewCharacter};
pub use favorite::{Favorite, FavoriteTarget, Reference};
pub use planet::{NewPlanet, Planet};
pub use user::{NewUser, User};
