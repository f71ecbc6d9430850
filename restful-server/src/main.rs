use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::sync::Arc;

use restful_server::data::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
};
use restful_server::infrastructure::{
    config::AppConfig,
    database::{create_pool, run_migrations},
    jwt::JwtService,
    logging::init_logging,
    password::PasswordService,
    seed,
};
use restful_server::AppServices;

#[derive(Parser)]
#[command(name = "restful-server", version, about = "Users, categories and posts over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations and serve the HTTP API (default)
    Serve,
    /// Run migrations and load the demo dataset
    Seed {
        /// Truncate users, categories and posts first
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    init_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let jwt_service = Arc::new(
                JwtService::new(&config.jwt_secret, config.token_ttl)
                    .context("failed to initialize JWT service")?,
            );

            let services = AppServices::new(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresCategoryRepository::new(pool.clone())),
                Arc::new(PostgresPostRepository::new(pool.clone())),
                jwt_service,
            );

            tracing::info!("Services initialized successfully");

            run_http_server(&config, services).await?;
        }
        Command::Seed { reset } => {
            seed::load(&pool, &PasswordService::new(), reset).await?;
            tracing::info!("Seed completed");
        }
    }

    tracing::info!("Shutting down...");
    Ok(())
}

/// Configure CORS for the HTTP server with allowed origins from .env
fn configure_cors(allowed_origins: &str) -> actix_cors::Cors {
    use actix_cors::Cors;
    use actix_web::http::header;

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::LOCATION])
        .max_age(3600);

    for origin in allowed_origins.split(',').map(str::trim) {
        if !origin.is_empty() {
            cors = cors.allowed_origin(origin);
            tracing::debug!("Added allowed CORS origin: {}", origin);
        }
    }

    cors
}

async fn run_http_server(config: &AppConfig, services: AppServices) -> anyhow::Result<()> {
    use actix_web::{middleware::Logger, App, HttpServer};

    let addr = config.http_addr();
    let cors_allowed_origins = config.cors_allowed_origins.clone();

    tracing::info!("CORS allowed origins: {}", cors_allowed_origins);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&cors_allowed_origins))
            .configure(|cfg| services.configure(cfg))
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {addr}"))?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    Ok(())
}
