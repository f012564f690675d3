use std::sync::Arc;

use auth::Authenticator;
use member_service::config::Config;
use member_service::domain::member::service::MemberService;
use member_service::inbound::http::router::create_router;
use member_service::outbound::repositories::PostgresMemberRepository;
use member_service::outbound::storage::HttpPhotoStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "member_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "member-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        storage_base_url = %config.storage.base_url,
        token_expiration_days = config.jwt.expiration_days,
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

    // A missing or weak signing secret fails here, before the server binds
    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes())?);

    let member_repository = Arc::new(PostgresMemberRepository::new(pg_pool));
    let photo_store = Arc::new(HttpPhotoStore::new(&config.storage));

    let member_service = Arc::new(MemberService::new(
        member_repository,
        photo_store,
        Arc::clone(&authenticator),
        config.jwt.expiration_days,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(member_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
