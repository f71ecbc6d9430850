use crate::data::UserRepository;
use crate::domain::user::{UserData, UserForm, UserResponse};
use crate::domain::validation::{page, ValidationContext};
use crate::domain::DomainError;
use crate::infrastructure::password::PasswordService;
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    passwords: Arc<PasswordService>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, passwords: Arc<PasswordService>) -> Self {
        Self {
            user_repo,
            passwords,
        }
    }

    async fn prepare_data(
        &self,
        form: UserForm,
        context: ValidationContext,
    ) -> Result<UserData, DomainError> {
        let form = form.prepare();
        form.validate(context)?;

        Ok(UserData {
            password_hash: self.passwords.clone().spawn_hash(form.password).await?,
            username: form.username,
            email: form.email,
        })
    }

    /// Users may only modify themselves.
    pub fn ensure_self(&self, id: i64, subject: i64) -> Result<(), DomainError> {
        if subject != id {
            tracing::warn!("User {} attempted to modify user {}", subject, id);
            return Err(DomainError::Unauthorized);
        }
        Ok(())
    }

    pub async fn create_user(&self, form: UserForm) -> Result<UserResponse, DomainError> {
        let data = self.prepare_data(form, ValidationContext::Create).await?;
        let user = self.user_repo.create(data).await?;

        tracing::info!("User created: id={}", user.id);

        Ok(UserResponse::from(user))
    }

    pub async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<UserResponse>, DomainError> {
        let (limit, offset) = page(limit, offset)?;
        let users = self.user_repo.list(limit, offset).await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user(&self, id: i64) -> Result<UserResponse, DomainError> {
        let user = self.user_repo.find_by_id(id).await?;
        Ok(UserResponse::from(user))
    }

    /// The ownership check runs before the form is looked at.
    pub async fn update_user(
        &self,
        id: i64,
        subject: i64,
        form: UserForm,
    ) -> Result<UserResponse, DomainError> {
        self.ensure_self(id, subject)?;

        let data = self.prepare_data(form, ValidationContext::Update).await?;
        let user = self.user_repo.update(id, data).await?;

        tracing::info!("User updated: id={}", id);

        Ok(UserResponse::from(user))
    }

    pub async fn delete_user(&self, id: i64, subject: i64) -> Result<(), DomainError> {
        self.ensure_self(id, subject)?;

        self.user_repo.delete(id).await?;

        tracing::info!("User deleted: id={}", id);

        Ok(())
    }
}
