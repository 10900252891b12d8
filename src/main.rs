mod core;
mod features;
mod shared;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::{BootstrapAdminConfig, Config};
use crate::core::database;
use crate::core::error::AppError;
use crate::core::router::{build_router, AppServices};
use crate::core::session::SessionStore;
use crate::features::categories::services::PgCategoryStore;
use crate::features::tickets::services::PgTicketStore;
use crate::features::users::dtos::CreateUserDto;
use crate::features::users::services::{PgUserStore, UserService};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, session_idle_timeout={:?}",
        worker_threads,
        config.session.idle_timeout
    );

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let sessions = Arc::new(SessionStore::new(config.session.clone()));
    let services = AppServices::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgCategoryStore::new(pool.clone())),
        Arc::new(PgTicketStore::new(pool)),
        sessions,
    );

    if let Some(admin) = &config.bootstrap_admin {
        ensure_bootstrap_admin(&services.users, admin).await?;
    }

    let app = build_router(services, config.app.max_request_body_size);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the configured administrator unless the email is already taken
async fn ensure_bootstrap_admin(
    users: &UserService,
    admin: &BootstrapAdminConfig,
) -> anyhow::Result<()> {
    let dto = CreateUserDto {
        full_name: admin.full_name.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
    };

    match users.create(&dto).await {
        Ok(id) => tracing::info!("Bootstrap admin created with id {}", id),
        Err(AppError::Validation(errors)) => {
            tracing::info!("Bootstrap admin not created: {}", errors)
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to create bootstrap admin: {}", e)),
    }

    Ok(())
}
