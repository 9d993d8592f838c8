use std::net::SocketAddr;
use std::sync::Arc;

use attendance_api::config::ServerConfig;
use attendance_api::handlers::auth::ensure_bootstrap_admin;
use attendance_api::router::build_app_router;
use attendance_api::state::AppState;
use attendance_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "attendance_api=debug,attendance_db=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        shortage_threshold = config.shortage_threshold,
        token_expiry_days = config.jwt.token_expiry_days,
        "Loaded server configuration",
    );

    let pool = prepare_database().await;

    if let Some(admin) = &config.bootstrap_admin {
        match ensure_bootstrap_admin(&pool, admin).await {
            Ok(true) => {}
            Ok(false) => tracing::info!(email = %admin.email, "Bootstrap admin already exists"),
            Err(e) => panic!("Failed to create bootstrap admin: {e}"),
        }
    }

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Attendance service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Structured logs to stdout, filtered by `RUST_LOG`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect to `DATABASE_URL`, confirm it answers, and apply migrations.
///
/// Any failure here aborts startup.
async fn prepare_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = attendance_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    attendance_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    attendance_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready, migrations applied");
    pool
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down");
}
