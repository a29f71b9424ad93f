use std::sync::Arc;

use anyhow::Context;
use auth::AuthStrategy;
use auth::InMemorySessionStore;
use auth::SessionStore;
use board_service::config::Config;
use board_service::config::StorageBackend;
use board_service::domain::post::ports::PostServicePort;
use board_service::domain::post::service::PostService;
use board_service::domain::user::ports::UserServicePort;
use board_service::domain::user::service::UserService;
use board_service::inbound::http::router::create_router;
use board_service::outbound::repositories::InMemoryPostRepository;
use board_service::outbound::repositories::InMemoryUserRepository;
use board_service::outbound::repositories::PostgresPostRepository;
use board_service::outbound::repositories::PostgresSessionStore;
use board_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "board_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "board-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Invalid configuration")?;

    tracing::info!(
        backend = ?config.database.backend,
        strategy = ?config.auth.strategy,
        session_store = ?config.auth.session_store,
        http_port = config.server.http_port,
        "Configuration loaded"
    );

    let pg_pool = if config.requires_database() {
        Some(connect(&config).await?)
    } else {
        None
    };

    let session_store: Arc<dyn SessionStore> = match &pg_pool {
        Some(pool) if config.auth.uses_postgres_sessions() => {
            Arc::new(PostgresSessionStore::new(pool.clone()))
        }
        _ => Arc::new(InMemorySessionStore::new()),
    };
    let authenticator: Arc<dyn AuthStrategy> = Arc::new(
        config
            .auth
            .authenticator(session_store)
            .context("Invalid authentication settings")?,
    );
    let password_hasher = config
        .password
        .hasher()
        .context("Invalid password hashing cost")?;

    let (user_service, post_service) = match (&pg_pool, config.database.backend) {
        (Some(pool), StorageBackend::Postgres) => {
            let users: Arc<dyn UserServicePort> = Arc::new(UserService::new(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::clone(&authenticator),
                password_hasher,
            ));
            let posts: Arc<dyn PostServicePort> = Arc::new(PostService::new(Arc::new(
                PostgresPostRepository::new(pool.clone()),
            )));
            (users, posts)
        }
        _ => {
            let users: Arc<dyn UserServicePort> = Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::clone(&authenticator),
                password_hasher,
            ));
            let posts: Arc<dyn PostServicePort> =
                Arc::new(PostService::new(Arc::new(InMemoryPostRepository::new())));
            (users, posts)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, post_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool, anyhow::Error> {
    let url = config
        .database
        .url
        .as_deref()
        .context("database.url is not set")?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(pg_pool)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
