use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payorder::application::lifecycle::LifecycleManager;
use payorder::config::Config;
use payorder::domain::ports::OrderStoreBox;
use payorder::infrastructure::in_memory::InMemoryOrderStore;
use payorder::interfaces::http;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before parsing so `.env` values feed clap's env fallbacks
    let dotenv = dotenvy::dotenv();
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = dotenv {
        warn!("No .env file loaded ({}), relying on process environment", e);
    }

    // Fail before binding so a misconfigured service never accepts requests
    config.validate().into_diagnostic()?;

    let store: OrderStoreBox = Box::new(InMemoryOrderStore::new());
    let manager = Arc::new(LifecycleManager::new(store, config.merchant()));

    let addr = config.listen_addr().into_diagnostic()?;
    let allowed_origin = config.allowed_origin().into_diagnostic()?;
    let listener = TcpListener::bind(addr).await.into_diagnostic()?;
    info!(port = addr.port(), upi_id = %config.upi_id, "Payment service starting");

    http::serve(listener, Arc::clone(&manager), allowed_origin, shutdown_signal())
        .await
        .into_diagnostic()?;

    let orders = manager.order_count().await.into_diagnostic()?;
    info!(orders, "Payment service stopped; in-memory orders discarded");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
