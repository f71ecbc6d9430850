use crate::domain::DomainError;
use crate::infrastructure::jwt::JwtService;
use actix_web::dev::Payload;
use actix_web::http::header::Header;
use actix_web::{web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use std::future::{ready, Ready};
use std::sync::Arc;

/// Subject of a verified `Authorization: Bearer <token>` header.
///
/// Handlers that take this extractor reject the request with 401 before
/// their body runs when the header is missing, malformed, or carries a
/// token that fails verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl FromRequest for AuthenticatedUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, DomainError> {
    let jwt_service = match req.app_data::<web::Data<Arc<JwtService>>>() {
        Some(service) => service.get_ref().clone(),
        None => {
            return Err(DomainError::Internal(
                "JWT service not configured".to_string(),
            ));
        }
    };

    let credentials = Authorization::<Bearer>::parse(req).map_err(|e| {
        tracing::warn!("Rejected authorization header on {}: {}", req.path(), e);
        DomainError::Unauthorized
    })?;

    let user_id = jwt_service.verify_token(credentials.into_scheme().token())?;

    Ok(AuthenticatedUser { user_id })
}
