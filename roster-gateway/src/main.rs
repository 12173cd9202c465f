//! Entry point for the `roster-gateway` HTTP server.

use std::{sync::Arc, time::Duration};

use clap::Parser;
use roster_gateway::{
    config::{Args, Config},
    routes::create_router,
};
use roster_store::{SqliteConfig, SqliteStore};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Time in-flight requests get to finish once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match Config::load(&args) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    let store = match SqliteStore::open(&SqliteConfig::new(&config.storage_path)) {
        Ok(s) => s,
        Err(e) => {
            error!(path = %config.storage_path.display(), error = %e, "failed to open storage");
            std::process::exit(1);
        }
    };
    info!(env = %config.env, version = env!("CARGO_PKG_VERSION"), "storage initialized");

    let app = create_router(Arc::new(store.clone()));
    let addr = config.http_server.address.as_str();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %addr, "server started");

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        () = shutdown_signal() => {}
        result = &mut server => {
            match result {
                Ok(Ok(())) => warn!("server stopped unexpectedly"),
                Ok(Err(e)) => error!(error = %e, "server error"),
                Err(e) => error!(error = %e, "server task failed"),
            }
            close_store(store);
            std::process::exit(1);
        }
    }

    info!("shutting down the server");
    let _ = stop_tx.send(());

    match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
        Ok(Ok(Ok(()))) => info!("server shutdown successfully"),
        Ok(Ok(Err(e))) => error!(error = %e, "failed to shutdown server"),
        Ok(Err(e)) => error!(error = %e, "server task failed"),
        Err(_) => {
            warn!(
                grace_secs = SHUTDOWN_GRACE.as_secs(),
                "grace period elapsed, abandoning in-flight requests"
            );
            server.abort();
        }
    }

    close_store(store);
}

fn close_store(store: SqliteStore) {
    match store.close() {
        Ok(true) => info!("storage closed"),
        Ok(false) => warn!("storage still in use; it closes when the last handle is dropped"),
        Err(e) => error!(error = %e, "failed to close storage"),
    }
}

/// Resolves on ctrl-c, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
