use crate::data::{CategoryRepository, PostRepository, UserRepository};
use crate::data::{PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository};
use crate::domain::post::PostData;
use crate::domain::user::UserData;
use crate::infrastructure::password::PasswordService;
use anyhow::{Context, Result};
use sqlx::PgPool;

const SEED_PASSWORD: &str = "password";

const USERS: [(&str, &str); 2] = [
    ("Steven victor", "steven@gmail.com"),
    ("Martin Luther", "luther@gmail.com"),
];
const CATEGORIES: [&str; 2] = ["Category 1", "Category 2"];
const POSTS: [(&str, &str); 2] = [("Title 1", "Hello world 1"), ("Title 2", "Hello world 2")];

/// Loads the demo dataset: each user gets one category and one post.
/// Without `reset` the load is skipped when users already exist.
pub async fn load(pool: &PgPool, passwords: &PasswordService, reset: bool) -> Result<()> {
    if reset {
        tracing::warn!("Truncating users, categories and posts");
        sqlx::query("TRUNCATE TABLE posts, categories, users RESTART IDENTITY CASCADE")
            .execute(pool)
            .await
            .context("failed to truncate tables")?;
    } else {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .context("failed to count users")?;
        if existing > 0 {
            tracing::info!("Database already has {} users, skipping seed", existing);
            return Ok(());
        }
    }

    let users = PostgresUserRepository::new(pool.clone());
    let categories = PostgresCategoryRepository::new(pool.clone());
    let posts = PostgresPostRepository::new(pool.clone());

    for ((username, email), (category_name, (title, content))) in
        USERS.into_iter().zip(CATEGORIES.into_iter().zip(POSTS))
    {
        let user = users
            .create(UserData {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: passwords.hash(SEED_PASSWORD)?,
            })
            .await
            .with_context(|| format!("cannot seed user {username}"))?;

        let category = categories
            .create(category_name)
            .await
            .with_context(|| format!("cannot seed category {category_name}"))?;

        let post = posts
            .create(PostData {
                title: title.to_string(),
                content: content.to_string(),
                author_id: user.id,
                category_id: category.id,
            })
            .await
            .with_context(|| format!("cannot seed post {title}"))?;

        tracing::info!(
            "Seeded user {} with category {} and post {}",
            user.id,
            category.id,
            post.id
        );
    }

    Ok(())
}
