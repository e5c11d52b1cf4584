//! Request validation: turn an untyped JSON body into a typed request or one error that
//! lists every problem at once.

use crate::error::AppError;
use serde_json::Value;
use std::fmt;

/// Fields a signup body must carry, in reporting order.
const REQUIRED_USER_FIELDS: [&str; 3] = ["username", "email", "password"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("Missing required fields: {}", self.missing.join(", ")));
        }
        if !self.invalid.is_empty() {
            parts.push(format!("Invalid fields: {}", self.invalid.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a signup body. Absent, null and blank fields count as missing, non-string
    /// values as invalid. Field contents are otherwise free-form.
    pub fn create_user(body: &Value) -> Result<CreateUserRequest, AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".into()))?;

        let mut errors = ValidationErrors::default();
        let mut values: Vec<String> = Vec::with_capacity(REQUIRED_USER_FIELDS.len());
        for field in REQUIRED_USER_FIELDS {
            match obj.get(field) {
                None | Some(Value::Null) => errors.missing.push(field.to_string()),
                Some(Value::String(s)) if s.trim().is_empty() => {
                    errors.missing.push(field.to_string())
                }
                Some(Value::String(s)) => values.push(s.clone()),
                Some(_) => errors.invalid.push(field.to_string()),
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let mut values = values.into_iter();
        match (values.next(), values.next(), values.next()) {
            (Some(username), Some(email), Some(password)) => Ok(CreateUserRequest {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password,
            }),
            _ => Err(AppError::Internal("validated fields out of order".into())),
        }
    }
}
