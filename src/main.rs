use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filedepot::{
    api,
    auth::SessionStore,
    blob::LocalBlobStore,
    config::Config,
    storage::Database,
    thumbnail::{JobQueue, ThumbnailWorker},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    match log_format.to_lowercase().as_str() {
        "gcp" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_stackdriver::layer())
                .init();
        }
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_list(false),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    info!(version = env!("CARGO_PKG_VERSION"), "filedepot starting");

    // Load configuration
    let config = Config::load()?;

    // Initialize the metadata database
    let db = Database::open(&config.server.data_dir)?;
    info!("Database opened at: {}", config.server.data_dir);

    // Initialize blob storage
    let blob_store: Arc<dyn filedepot::blob::BlobStore> =
        Arc::new(LocalBlobStore::new(&config.storage.root)?);
    info!("Blob storage root: {}", config.storage.root.display());

    // Session store
    let sessions = SessionStore::new(config.session.ttl_secs);

    // Thumbnail pipeline: queue feeding a background worker
    let (jobs, job_rx) = JobQueue::new(config.thumbnails.queue_capacity);
    let worker = ThumbnailWorker::new(
        db.clone(),
        Arc::clone(&blob_store),
        config.thumbnails.sizes.clone(),
        config.thumbnails.worker_concurrency,
    );
    let worker_handle = worker.spawn(job_rx);

    // Create shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        sessions,
        blob_store,
        jobs,
    });

    // Periodically reclaim expired sessions
    let sweeper_handle = {
        let state = Arc::clone(&state);
        let interval = Duration::from_secs(config.session.purge_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let purged = state.sessions.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, "Purged expired sessions");
                }
            }
        })
    };

    // Build and start the HTTP server
    let app = api::create_router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!("Listening on: {}", config.server.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cleanup: abort background tasks
    info!("Shutting down background tasks");
    sweeper_handle.abort();
    worker_handle.abort();

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
