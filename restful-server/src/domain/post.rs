use crate::domain::category::Category;
use crate::domain::user::UserResponse;
use crate::domain::validation::{blank_as_none, require, require_id, sanitize};
use crate::domain::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub author_id: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category_id: Option<i64>,
}

/// Post fields ready to be written.
#[derive(Debug, Clone)]
pub struct PostData {
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub category_id: i64,
}

impl PostForm {
    pub fn prepare(self) -> Self {
        Self {
            title: sanitize(&self.title),
            content: sanitize(&self.content),
            ..self
        }
    }

    pub fn validate(self) -> Result<PostData, DomainError> {
        require(&self.title, "Required Title")?;
        require(&self.content, "Required Content")?;
        let author_id = require_id(self.author_id, "Required Author")?;
        let category_id = require_id(self.category_id, "Required Category")?;

        Ok(PostData {
            title: self.title,
            content: self.content,
            author_id,
            category_id,
        })
    }
}

/// A post with its author and category resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub category_id: i64,
    pub author: UserResponse,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn new(post: Post, author: UserResponse, category: Category) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            category_id: post.category_id,
            author,
            category,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
