use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod completion;
mod config;
mod error;
mod jwt;
mod middleware;
mod models;
mod rate_limiter;
mod repositories;
mod routes;
mod state;
mod validation;

use std::net::SocketAddr;

use common::database::{DatabaseConfig, database, health_check, init_client};
use tokio::net::TcpListener;

use crate::{
    completion::{CompletionClient, CompletionConfig},
    config::{AdminCredentials, ServerConfig},
    jwt::{JwtService, SessionConfig},
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::{
        AdminRepository, ChatHistoryRepository, LeadRepository, ProjectRepository, UserRepository,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting DevAgency API service");

    // Initialize the database client; it lives for the whole process and is
    // shut down explicitly after the server drains.
    let db_config = DatabaseConfig::from_env()?;
    let client = init_client(&db_config).await?;
    let db = database(&client, &db_config);

    if health_check(&db).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize the session and completion services
    let session_config = SessionConfig::from_env()?;
    let jwt_service = JwtService::new(&session_config);

    let completion_config = CompletionConfig::from_env()?;
    let completion_client = CompletionClient::new(&completion_config)?;

    info!("DevAgency API service initialized successfully");

    let app_state = AppState {
        jwt_service,
        completion_client,
        rate_limiter: RateLimiter::new(RateLimiterConfig::default()),
        admin_credentials: AdminCredentials::from_env(),
        user_repository: UserRepository::new(&db),
        project_repository: ProjectRepository::new(&db),
        lead_repository: LeadRepository::new(&db),
        chat_repository: ChatHistoryRepository::new(&db),
        admin_repository: AdminRepository::new(&db),
    };

    // Start the web server; connect info is needed for per-IP rate limiting
    let app = routes::create_router(app_state);

    let server_config = ServerConfig::from_env();
    let listener = TcpListener::bind(&server_config.bind_addr).await?;
    info!("API service listening on {}", server_config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    client.shutdown().await;
    info!("Database client shut down, exiting");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
