use crate::data::CategoryRepository;
use crate::domain::category::CategoryForm;
use crate::domain::validation::page;
use crate::domain::{Category, DomainError};
use std::sync::Arc;

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn create_category(&self, form: CategoryForm) -> Result<Category, DomainError> {
        let form = form.prepare();
        form.validate()?;

        let category = self.category_repo.create(&form.name).await?;

        tracing::info!("Category created: id={}", category.id);

        Ok(category)
    }

    pub async fn list_categories(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Category>, DomainError> {
        let (limit, offset) = page(limit, offset)?;
        self.category_repo.list(limit, offset).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        self.category_repo.find_by_id(id).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        form: CategoryForm,
    ) -> Result<Category, DomainError> {
        // 404 takes precedence over a bad form
        self.category_repo.find_by_id(id).await?;

        let form = form.prepare();
        form.validate()?;

        let category = self.category_repo.update(id, &form.name).await?;

        tracing::info!("Category updated: id={}", id);

        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), DomainError> {
        self.category_repo.delete(id).await?;

        tracing::info!("Category deleted: id={}", id);

        Ok(())
    }
}
