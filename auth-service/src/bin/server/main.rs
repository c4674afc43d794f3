use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::domain::account::service::AccountService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::mailer::TracingMailer;
use auth_service::outbound::repositories::PostgresAccountStore;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_ttl_hours = config.jwt.expiration_hours,
        verification_ttl_hours = config.tokens.verification_ttl_hours,
        reset_ttl_minutes = config.tokens.reset_ttl_minutes,
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

    let http_address = format!("0.0.0.0:{}", config.server.http_port);

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let store = Arc::new(PostgresAccountStore::new(pg_pool));
    let mailer = Arc::new(TracingMailer::new(format!(
        "http://localhost:{}",
        config.server.http_port
    )));

    let account_service = Arc::new(AccountService::new(
        store,
        mailer,
        Arc::clone(&authenticator),
        config.jwt.expiration_hours,
        Duration::hours(config.tokens.verification_ttl_hours),
        Duration::minutes(config.tokens.reset_ttl_minutes),
    ));

    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(account_service, authenticator);
    axum::serve(listener, application).await?;

    Ok(())
}
