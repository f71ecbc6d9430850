pub mod http_handlers;
pub mod middleware;
pub mod routes;

pub use middleware::AuthenticatedUser;
pub use routes::configure_routes;
