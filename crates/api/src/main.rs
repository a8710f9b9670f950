use std::net::SocketAddr;
use std::sync::Arc;

use relay_core::lifecycle::JobLifecycleService;
use relay_core::store::{InMemoryJobStore, JobStore};
use relay_db::store::PgJobStore;
use relay_engine::api::EngineApi;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_api::config::ServerConfig;
use relay_api::router::build_app_router;
use relay_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relay_api=debug,relay_core=debug,relay_db=debug,relay_engine=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Job store ---
    let store: Arc<dyn JobStore> = match &config.database_url {
        Some(database_url) => {
            let pool = relay_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            relay_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            relay_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgJobStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; job results are kept in memory only");
            Arc::new(InMemoryJobStore::new())
        }
    };

    // --- Workflow engine ---
    let engine = Arc::new(EngineApi::new(config.engine_start_url.clone()));
    tracing::info!(url = %engine.start_url(), "Workflow engine client configured");

    // --- Lifecycle service ---
    let mut service = JobLifecycleService::new(store, engine);
    if let Some(ttl) = config.result_ttl {
        tracing::info!(ttl_secs = ttl.num_seconds(), "Job result retention enabled");
        service = service.with_retention(ttl);
    }

    // --- App state ---
    let state = AppState { service };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
