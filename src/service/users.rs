//! User signup and lookup.

use super::CreateUserRequest;
use crate::error::AppError;
use crate::model::{NewUser, Reference, User};
use crate::password::hash_password;
use crate::store::{InsertOutcome, Store};

pub struct UserService;

impl UserService {
    pub async fn list(store: &dyn Store) -> Result<Vec<User>, AppError> {
        store.list_users().await
    }

    pub async fn get(store: &dyn Store, id: i32) -> Result<User, AppError> {
        store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(Reference::User.not_found_message().into()))
    }

    /// Create an active user. A taken username or email is a `Conflict`.
    pub async fn create(store: &dyn Store, request: CreateUserRequest) -> Result<User, AppError> {
        let password_hash = hash_password(request.password).await?;
        let new_user = NewUser {
            username: request.username,
            email: request.email,
            password_hash,
        };
        match store.insert_user(new_user).await? {
            InsertOutcome::Inserted(user) => {
                tracing::info!(user_id = user.id, "user created");
                Ok(user)
            }
            InsertOutcome::Conflict => Err(AppError::Conflict("User already exists".into())),
            InsertOutcome::MissingReference(reference) => {
                Err(AppError::NotFound(reference.not_found_message().into()))
            }
        }
    }
}
