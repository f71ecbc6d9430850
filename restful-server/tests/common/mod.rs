#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use restful_server::data::{CategoryRepository, PostRepository, UserRepository};
use restful_server::domain::post::PostData;
use restful_server::domain::user::UserData;
use restful_server::domain::{Category, DomainError, Post, Reference, UniqueField, User};
use restful_server::infrastructure::jwt::JwtService;
use restful_server::infrastructure::password::PasswordService;
use restful_server::AppServices;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "password";

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    posts: BTreeMap<i64, Post>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_user_unique(&self, id: Option<i64>, data: &UserData) -> Result<(), DomainError> {
        for user in self.users.values().filter(|u| Some(u.id) != id) {
            if user.username == data.username {
                return Err(DomainError::Conflict(UniqueField::Username));
            }
            if user.email == data.email {
                return Err(DomainError::Conflict(UniqueField::Email));
            }
        }
        Ok(())
    }

    fn check_post(&self, id: Option<i64>, data: &PostData) -> Result<(), DomainError> {
        if self
            .posts
            .values()
            .any(|p| Some(p.id) != id && p.title == data.title)
        {
            return Err(DomainError::Conflict(UniqueField::Title));
        }
        if !self.users.contains_key(&data.author_id) {
            return Err(DomainError::MissingReference(Reference::Author));
        }
        if !self.categories.contains_key(&data.category_id) {
            return Err(DomainError::MissingReference(Reference::Category));
        }
        Ok(())
    }
}

/// Stand-in for PostgreSQL that mimics its unique, foreign-key and cascade
/// behaviour closely enough for the HTTP layer.
#[derive(Default)]
pub struct InMemoryDb {
    state: Mutex<State>,
}

impl InMemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryDb {
    async fn create(&self, data: UserData) -> Result<User, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.check_user_unique(None, &data)?;

        let now = Utc::now();
        let user = User {
            id: state.next_id(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, DomainError> {
        let state = self.state.lock().unwrap();
        state.users.get(&id).cloned().ok_or(DomainError::UserNotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        let state = self.state.lock().unwrap();
        state
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, data: UserData) -> Result<User, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.check_user_unique(Some(id), &data)?;

        let user = state.users.get_mut(&id).ok_or(DomainError::UserNotFound)?;
        user.username = data.username;
        user.email = data.email;
        user.password_hash = data.password_hash;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.users.remove(&id).ok_or(DomainError::UserNotFound)?;
        state.posts.retain(|_, p| p.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryDb {
    async fn create(&self, name: &str) -> Result<Category, DomainError> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let category = Category {
            id: state.next_id(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: i64) -> Result<Category, DomainError> {
        let state = self.state.lock().unwrap();
        state
            .categories
            .get(&id)
            .cloned()
            .ok_or(DomainError::CategoryNotFound)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Category>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, name: &str) -> Result<Category, DomainError> {
        let mut state = self.state.lock().unwrap();
        let category = state
            .categories
            .get_mut(&id)
            .ok_or(DomainError::CategoryNotFound)?;
        category.name = name.to_string();
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state
            .categories
            .remove(&id)
            .ok_or(DomainError::CategoryNotFound)?;
        state.posts.retain(|_, p| p.category_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryDb {
    async fn create(&self, data: PostData) -> Result<Post, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.check_post(None, &data)?;

        let now = Utc::now();
        let post = Post {
            id: state.next_id(),
            title: data.title,
            content: data.content,
            author_id: data.author_id,
            category_id: data.category_id,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, DomainError> {
        let state = self.state.lock().unwrap();
        state.posts.get(&id).cloned().ok_or(DomainError::PostNotFound)
    }

    async fn update(&self, id: i64, data: PostData) -> Result<Post, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.check_post(Some(id), &data)?;

        let post = state.posts.get_mut(&id).ok_or(DomainError::PostNotFound)?;
        post.title = data.title;
        post.content = data.content;
        post.category_id = data.category_id;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.posts.remove(&id).ok_or(DomainError::PostNotFound)?;
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub fn jwt() -> Arc<JwtService> {
    Arc::new(JwtService::new(JWT_SECRET, Duration::hours(1)).unwrap())
}

pub fn services(db: &Arc<InMemoryDb>) -> AppServices {
    AppServices::new(db.clone(), db.clone(), db.clone(), jwt())
}

pub fn bearer(user_id: i64) -> String {
    format!("Bearer {}", jwt().generate_token(user_id).unwrap())
}

/// Inserts a user whose password is [`PASSWORD`].
pub async fn seed_user(db: &InMemoryDb, username: &str, email: &str) -> User {
    let password_hash = PasswordService::new().hash(PASSWORD).unwrap();
    UserRepository::create(
        db,
        UserData {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_category(db: &InMemoryDb, name: &str) -> Category {
    CategoryRepository::create(db, name).await.unwrap()
}

pub async fn seed_post(db: &InMemoryDb, title: &str, author_id: i64, category_id: i64) -> Post {
    PostRepository::create(
        db,
        PostData {
            title: title.to_string(),
            content: format!("{title} content"),
            author_id,
            category_id,
        },
    )
    .await
    .unwrap()
}
