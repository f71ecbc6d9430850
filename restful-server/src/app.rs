use crate::application::{AuthService, CategoryService, PostService, UserService};
use crate::data::{CategoryRepository, PostRepository, UserRepository};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordService;
use crate::presentation::configure_routes;
use actix_web::web;
use std::sync::Arc;

/// Everything a request handler can reach, built once at startup and
/// shared by every worker.
#[derive(Clone)]
pub struct AppServices {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub post_service: Arc<PostService>,
    pub jwt_service: Arc<JwtService>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        post_repo: Arc<dyn PostRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        let passwords = Arc::new(PasswordService::new());

        Self {
            auth_service: Arc::new(AuthService::new(
                user_repo.clone(),
                passwords.clone(),
                jwt_service.clone(),
            )),
            user_service: Arc::new(UserService::new(user_repo.clone(), passwords)),
            category_service: Arc::new(CategoryService::new(category_repo.clone())),
            post_service: Arc::new(PostService::new(post_repo, user_repo, category_repo)),
            jwt_service,
        }
    }

    /// Registers shared state and the route table on an `App`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.auth_service.clone()))
            .app_data(web::Data::new(self.user_service.clone()))
            .app_data(web::Data::new(self.category_service.clone()))
            .app_data(web::Data::new(self.post_service.clone()))
            .app_data(web::Data::new(self.jwt_service.clone()));

        configure_routes(cfg);
    }
}
