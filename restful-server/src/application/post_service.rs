use crate::data::{CategoryRepository, PostRepository, UserRepository};
use crate::domain::post::{PostForm, PostResponse};
use crate::domain::user::UserResponse;
use crate::domain::validation::page;
use crate::domain::{DomainError, Post};
use std::sync::Arc;

pub struct PostService {
    post_repo: Arc<dyn PostRepository>,
    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl PostService {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        user_repo: Arc<dyn UserRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            post_repo,
            user_repo,
            category_repo,
        }
    }

    /// Attaches the author and category to a stored post.
    async fn resolve(&self, post: Post) -> Result<PostResponse, DomainError> {
        let author = self.user_repo.find_by_id(post.author_id).await?;
        let category = self.category_repo.find_by_id(post.category_id).await?;

        Ok(PostResponse::new(post, UserResponse::from(author), category))
    }

    /// The author defaults to the token subject; naming someone else is
    /// rejected.
    pub async fn create_post(
        &self,
        subject: i64,
        mut form: PostForm,
    ) -> Result<PostResponse, DomainError> {
        match form.author_id {
            Some(author_id) if author_id != subject => {
                tracing::warn!(
                    "User {} attempted to create a post as user {}",
                    subject,
                    author_id
                );
                return Err(DomainError::Unauthorized);
            }
            Some(_) => {}
            None => form.author_id = Some(subject),
        }

        let data = form.prepare().validate()?;
        let post = self.post_repo.create(data).await?;

        tracing::info!("Post created: id={}, author_id={}", post.id, subject);

        self.resolve(post).await
    }

    pub async fn get_post(&self, id: i64) -> Result<PostResponse, DomainError> {
        let post = self.post_repo.find_by_id(id).await?;
        self.resolve(post).await
    }

    pub async fn list_posts(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PostResponse>, DomainError> {
        let (limit, offset) = page(limit, offset)?;
        let posts = self.post_repo.list(limit, offset).await?;

        let mut responses = Vec::with_capacity(posts.len());
        for post in posts {
            responses.push(self.resolve(post).await?);
        }

        Ok(responses)
    }

    /// Loads a post for modification: 404 when absent, 401 unless the
    /// subject wrote it.
    pub async fn owned_post(&self, id: i64, subject: i64) -> Result<Post, DomainError> {
        let post = self.post_repo.find_by_id(id).await?;

        if post.author_id != subject {
            tracing::warn!(
                "User {} attempted to modify post {} owned by {}",
                subject,
                id,
                post.author_id
            );
            return Err(DomainError::Unauthorized);
        }

        Ok(post)
    }

    /// Rewrites a post obtained from [`PostService::owned_post`]; the stored
    /// author is kept.
    pub async fn update_post(
        &self,
        post: Post,
        mut form: PostForm,
    ) -> Result<PostResponse, DomainError> {
        form.author_id = Some(post.author_id);
        let data = form.prepare().validate()?;
        let updated_post = self.post_repo.update(post.id, data).await?;

        tracing::info!("Post updated: id={}, author_id={}", post.id, post.author_id);

        self.resolve(updated_post).await
    }

    pub async fn delete_post(&self, id: i64, subject: i64) -> Result<(), DomainError> {
        self.owned_post(id, subject).await?;
        self.post_repo.delete(id).await?;

        tracing::info!("Post deleted: id={}, author_id={}", id, subject);

        Ok(())
    }
}
