use crate::domain::DomainError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    pub user_id: i64,
    pub exp: usize,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, DomainError> {
        tracing::debug!(
            "Initializing JwtService with secret length: {}",
            secret.len()
        );

        if secret.is_empty() {
            return Err(DomainError::Internal(
                "JWT secret must not be empty".to_string(),
            ));
        }

        if secret.len() < 32 {
            tracing::warn!(
                "JWT secret is too short ({} chars). Minimum recommended is 32 chars.",
                secret.len()
            );
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn generate_token(&self, user_id: i64) -> Result<String, DomainError> {
        tracing::debug!("Generating token for user_id: {}", user_id);

        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| DomainError::Internal("Token expiry overflow".to_string()))?
            .timestamp() as usize;

        let claims = Claims {
            authorized: true,
            user_id,
            exp: expiration,
        };

        match encode(&Header::default(), &claims, &self.encoding_key) {
            Ok(token) => {
                tracing::debug!("Token encoded successfully, length: {}", token.len());
                Ok(token)
            }
            Err(e) => {
                tracing::error!("Failed to encode token: {}", e);
                Err(DomainError::Internal(format!(
                    "Failed to generate token: {}",
                    e
                )))
            }
        }
    }

    pub fn verify_token(&self, token: &str) -> Result<i64, DomainError> {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(token_data) => {
                tracing::debug!("Token verified for user_id: {}", token_data.claims.user_id);
                Ok(token_data.claims.user_id)
            }
            Err(e) => {
                tracing::warn!("Token verification failed: {}", e);
                Err(DomainError::Unauthorized)
            }
        }
    }
}
