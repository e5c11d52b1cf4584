//! HTTP handlers for users, the people/planets catalog, and favorites.

pub mod catalog;
pub mod favorites;
pub mod users;
pub use catalog::*;
pub use favorites::*;
pub use users::*;
