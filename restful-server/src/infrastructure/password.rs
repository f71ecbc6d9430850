use crate::domain::DomainError;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password does not match")]
    Mismatch,

    #[error("password verification failed: {0}")]
    Internal(String),
}

impl From<PasswordError> for DomainError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => DomainError::IncorrectPassword,
            PasswordError::Internal(msg) => DomainError::Internal(msg),
        }
    }
}

/// Argon2id hashing with the crate's default cost parameters.
#[derive(Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        match self.argon2.hash_password(password.as_bytes(), &salt) {
            Ok(hash) => {
                tracing::debug!("Password hashed successfully");
                Ok(hash.to_string())
            }
            Err(e) => {
                tracing::error!("Password hashing failed: {}", e);
                Err(DomainError::Internal(format!(
                    "Password hashing failed: {}",
                    e
                )))
            }
        }
    }

    pub fn verify(&self, password_hash: &str, password: &str) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(password_hash).map_err(|e| {
            tracing::error!("Invalid password hash format: {}", e);
            PasswordError::Internal(format!("Invalid password hash: {}", e))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(password_hash::Error::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::Internal(e.to_string())),
        }
    }

    /// `hash` on the blocking pool, off the request worker.
    pub async fn spawn_hash(self: Arc<Self>, password: String) -> Result<String, DomainError> {
        tokio::task::spawn_blocking(move || self.hash(&password))
            .await
            .map_err(|e| DomainError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    /// `verify` on the blocking pool.
    pub async fn spawn_verify(
        self: Arc<Self>,
        password_hash: String,
        password: String,
    ) -> Result<(), PasswordError> {
        tokio::task::spawn_blocking(move || self.verify(&password_hash, &password))
            .await
            .map_err(|e| PasswordError::Internal(format!("Password verification task failed: {}", e)))?
    }
}
