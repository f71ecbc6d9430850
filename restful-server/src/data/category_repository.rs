use crate::domain::{Category, DomainError};
use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, name: &str) -> Result<Category, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Category, DomainError>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Category>, DomainError>;
    async fn update(&self, id: i64, name: &str) -> Result<Category, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn category_from_row(row: &PgRow) -> Result<Category, DomainError> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, name: &str) -> Result<Category, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO categories (name, created_at, updated_at)
            VALUES ($1, NOW(), NOW())
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {}", e);
            DomainError::from(e)
        })?;

        category_from_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Category, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => category_from_row(&row),
            None => Err(DomainError::CategoryNotFound),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Category>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(category_from_row).collect()
    }

    async fn update(&self, id: i64, name: &str) -> Result<Category, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE categories
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => category_from_row(&row),
            None => Err(DomainError::CategoryNotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            Err(DomainError::CategoryNotFound)
        } else {
            Ok(())
        }
    }
}
