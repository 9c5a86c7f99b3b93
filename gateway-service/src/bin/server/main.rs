use std::sync::Arc;

use auth::TokenCodec;
use chrono::Duration;
use gateway_service::config::Config;
use gateway_service::domain::identity::models::IdentityName;
use gateway_service::domain::identity::service::IdentityService;
use gateway_service::inbound::http::router::create_router;
use gateway_service::outbound::documents::JsonFileDocumentStore;
use gateway_service::outbound::repositories::PostgresIdentityRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gateway-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // Configuration errors are fatal before any traffic is served.
    let codec = TokenCodec::new(config.auth.secret.as_bytes())?;
    let default_identity = IdentityName::new(config.auth.identity_name.clone())?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_hours = config.auth.token_ttl_hours,
        documents_path = %config.documents.path,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool));
    let identity_service = Arc::new(IdentityService::new(
        identity_repository,
        codec,
        Duration::hours(config.auth.token_ttl_hours),
    ));

    let document_store = Arc::new(JsonFileDocumentStore::open(&config.documents.path).await?);
    tracing::info!(path = %config.documents.path, "Document store opened");

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(identity_service, document_store, default_identity);
    axum::serve(http_listener, application).await?;

    Ok(())
}
