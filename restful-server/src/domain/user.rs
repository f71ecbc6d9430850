use crate::domain::validation::{require, require_email, sanitize, ValidationContext};
use crate::domain::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form body shared by register, create, update and login. Missing fields
/// deserialize as empty strings so validation can report them by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl UserForm {
    pub fn prepare(self) -> Self {
        Self {
            username: sanitize(&self.username),
            email: sanitize(&self.email),
            password: self.password,
        }
    }

    /// Returns the first unmet requirement. Login skips the username.
    pub fn validate(&self, context: ValidationContext) -> Result<(), DomainError> {
        match context {
            ValidationContext::Create | ValidationContext::Update => {
                require(&self.username, "Required Username")?;
                require(&self.password, "Required Password")?;
                require_email(&self.email)
            }
            ValidationContext::Login => {
                require(&self.password, "Required Password")?;
                require_email(&self.email)
            }
        }
    }
}

/// Validated user fields with the password already hashed.
#[derive(Debug, Clone)]
pub struct UserData {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
