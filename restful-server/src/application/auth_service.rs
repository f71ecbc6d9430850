use crate::data::UserRepository;
use crate::domain::user::{UserData, UserForm, UserResponse};
use crate::domain::validation::ValidationContext;
use crate::domain::DomainError;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordService;
use std::sync::Arc;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    passwords: Arc<PasswordService>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        passwords: Arc<PasswordService>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            passwords,
            jwt_service,
        }
    }

    pub async fn register(&self, form: UserForm) -> Result<(String, UserResponse), DomainError> {
        let form = form.prepare();
        form.validate(ValidationContext::Create)?;

        tracing::debug!("Registering user: {}", form.username);

        let password_hash = self.passwords.clone().spawn_hash(form.password).await?;
        let user = self
            .user_repo
            .create(UserData {
                username: form.username,
                email: form.email,
                password_hash,
            })
            .await
            .inspect_err(|e| tracing::warn!("Registration failed: {}", e))?;

        let token = self.jwt_service.generate_token(user.id)?;

        tracing::info!(
            "User registered successfully: id={}, username={}",
            user.id,
            user.username
        );

        Ok((token, UserResponse::from(user)))
    }

    /// Email lookup failures become `IncorrectEmail`; a wrong password is
    /// `IncorrectPassword`.
    pub async fn login(&self, form: UserForm) -> Result<(String, UserResponse), DomainError> {
        let form = form.prepare();
        form.validate(ValidationContext::Login)?;

        tracing::debug!("Login attempt for {}", form.email);

        let user = match self.user_repo.find_by_email(&form.email).await {
            Ok(u) => u,
            Err(DomainError::UserNotFound) => {
                tracing::warn!("Login failed: no user with email {}", form.email);
                return Err(DomainError::IncorrectEmail);
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self
            .passwords
            .clone()
            .spawn_verify(user.password_hash.clone(), form.password)
            .await
        {
            tracing::warn!("Login failed for user {}: {}", user.id, e);
            return Err(e.into());
        }

        let token = self.jwt_service.generate_token(user.id)?;

        tracing::info!(
            "User logged in successfully: id={}, username={}",
            user.id,
            user.username
        );

        Ok((token, UserResponse::from(user)))
    }
}
