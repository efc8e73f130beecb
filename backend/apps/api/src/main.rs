//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod gateway;

use anyhow::Context;
use axum::{
    Router, http,
    http::{HeaderName, Method, header},
    middleware,
};
use rbac::{PgMembershipRepository, RbacConfig, load_policy, rbac_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,rbac=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Policy is built once and shared read-only afterwards
    let mut rbac_config = match env::var("RBAC_POLICY_PATH") {
        Ok(path) => RbacConfig::with_policy_path(path),
        Err(_) => RbacConfig::default(),
    };
    if let Ok(table) = env::var("RBAC_MEMBER_TABLE") {
        rbac_config.member_table = table;
    }

    let policy = Arc::new(
        load_policy(&rbac_config)
            .await
            .context("failed to build authorization policy")?,
    );

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    let membership_repo = PgMembershipRepository::new(pool, &rbac_config.member_table)?;

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(gateway::USER_ID_HEADER),
            HeaderName::from_static(gateway::ORGANIZATION_ID_HEADER),
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/rbac", rbac_router(membership_repo, policy))
        .layer(middleware::from_fn(gateway::forward_identity))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("RBAC_LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .context("RBAC_LISTEN_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
