use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use folio_db::{
    ContentStore, IdentityStore, PgContentStore, PgIdentityStore, UnconfiguredStore,
};
use folio_events::{ChangeFeed, ChangeListener};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::auth::admin::seed_admin_account;
use folio_api::auth::oauth::{DiscordProvider, OAuthProvider};
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_api::ws;

/// Timeout for outbound image fetches.
const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    if config.admin_email.is_empty() {
        tracing::warn!("ADMIN_EMAIL is not set, the admin dashboard is unreachable");
    }

    // --- Change feed ---
    let change_feed = Arc::new(ChangeFeed::default());
    let listener_cancel = CancellationToken::new();

    // --- Store ---
    let (store, identity, listener_handle): (
        Arc<dyn ContentStore>,
        Arc<dyn IdentityStore>,
        Option<tokio::task::JoinHandle<()>>,
    ) = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = folio_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            folio_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            folio_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let handle = tokio::spawn(ChangeListener::run(
                pool.clone(),
                Arc::clone(&change_feed),
                listener_cancel.clone(),
            ));

            (
                Arc::new(PgContentStore::new(pool.clone())),
                Arc::new(PgIdentityStore::new(pool)),
                Some(handle),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, serving empty content");
            (Arc::new(UnconfiguredStore), Arc::new(UnconfiguredStore), None)
        }
    };

    // --- Admin account ---
    match config.admin_password_hash.as_deref() {
        Some(hash) => {
            if let Err(e) = seed_admin_account(identity.as_ref(), &config.admin_email, hash).await
            {
                tracing::error!(error = %e, "Failed to seed the admin account");
            }
        }
        None => tracing::info!("ADMIN_PASSWORD_HASH is not set, no admin account is seeded"),
    }

    // --- OAuth ---
    let oauth: Option<Arc<dyn OAuthProvider>> = config.discord.clone().map(|discord| {
        tracing::info!("Discord sign-in enabled");
        Arc::new(DiscordProvider::new(discord)) as Arc<dyn OAuthProvider>
    });

    // --- WebSocket manager + heartbeat ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_cancel = CancellationToken::new();
    let heartbeat_handle =
        ws::start_heartbeat(Arc::clone(&ws_manager), heartbeat_cancel.clone());

    let http = reqwest::Client::builder()
        .timeout(IMAGE_FETCH_TIMEOUT)
        .build()
        .expect("Failed to build reqwest HTTP client");

    // --- App state ---
    let state = AppState {
        store,
        identity,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        change_feed: Arc::clone(&change_feed),
        oauth,
        http,
    };

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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    listener_cancel.cancel();
    if let Some(handle) = listener_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Change listener stopped");
    }

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), heartbeat_handle).await;
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to start a graceful shutdown.
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
