use crate::domain::DomainError;
use crate::presentation::http_handlers as handlers;
use actix_web::web;

/// Malformed path ids, form bodies and query strings all answer 400 with
/// the usual `{"error": ...}` envelope.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected path parameters: {}", err);
        DomainError::BadRequest("Invalid identifier".to_string()).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected form body: {}", err);
        DomainError::BadRequest("Invalid form body".to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected query string: {}", err);
        DomainError::BadRequest("Invalid query".to_string()).into()
    }));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);

    cfg.route("/", web::get().to(handlers::home))
        // Public routes - authentication
        .route("/login", web::post().to(handlers::login))
        .route("/register", web::post().to(handlers::register))
        .service(
            web::scope("/users")
                .route("", web::post().to(handlers::create_user))
                .route("", web::get().to(handlers::list_users))
                .route("/{id}", web::get().to(handlers::get_user))
                .route("/{id}", web::put().to(handlers::update_user))
                .route("/{id}", web::delete().to(handlers::delete_user)),
        )
        .service(
            web::scope("/category")
                .route("", web::post().to(handlers::create_category))
                .route("", web::get().to(handlers::list_categories))
                .route("/{id}", web::get().to(handlers::get_category))
                .route("/{id}", web::put().to(handlers::update_category))
                .route("/{id}", web::delete().to(handlers::delete_category)),
        )
        .service(
            web::scope("/posts")
                .route("", web::post().to(handlers::create_post))
                .route("", web::get().to(handlers::list_posts))
                .route("/{id}", web::get().to(handlers::get_post))
                .route("/{id}", web::put().to(handlers::update_post))
                .route("/{id}", web::delete().to(handlers::delete_post)),
        );
}
