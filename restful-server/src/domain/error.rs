use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use thiserror::Error;

/// Column guarded by a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
    Title,
}

impl UniqueField {
    /// Maps a PostgreSQL constraint name to the field it protects.
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "users_username_key" => Some(Self::Username),
            "users_email_key" => Some(Self::Email),
            "posts_title_key" => Some(Self::Title),
            _ => None,
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => write!(f, "Username Already Taken"),
            Self::Email => write!(f, "Email Already Taken"),
            Self::Title => write!(f, "Title Already Taken"),
        }
    }
}

/// Row a foreign key points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Author,
    Category,
}

impl Reference {
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "posts_author_id_fkey" => Some(Self::Author),
            "posts_category_id_fkey" => Some(Self::Category),
            _ => None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author => write!(f, "Author Not Found"),
            Self::Category => write!(f, "Category Not Found"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("Incorrect Email")]
    IncorrectEmail,

    #[error("Incorrect Password")]
    IncorrectPassword,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("{0}")]
    Conflict(UniqueField),

    #[error("{0}")]
    MissingReference(Reference),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized => 401,
            Self::IncorrectEmail
            | Self::UserNotFound
            | Self::CategoryNotFound
            | Self::PostNotFound => 404,
            Self::Conflict(_) => 409,
            Self::Validation(_) | Self::IncorrectPassword | Self::MissingReference(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Message placed in the `{"error": ...}` envelope. Storage and internal
    /// failures are redacted.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.to_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.to_status_code() >= 500 {
            tracing::error!("Request failed: {}", self);
        }

        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.public_message() }))
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(constraint) = db_err.constraint() {
                if db_err.is_unique_violation() {
                    if let Some(field) = UniqueField::from_constraint(constraint) {
                        return Self::Conflict(field);
                    }
                }
                if db_err.is_foreign_key_violation() {
                    if let Some(reference) = Reference::from_constraint(constraint) {
                        return Self::MissingReference(reference);
                    }
                }
            }
        }

        Self::Database(err.to_string())
    }
}
