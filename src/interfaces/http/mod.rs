//! JSON-over-HTTP surface of the payment service.
//!
//! Handlers only decode requests, call the [`LifecycleManager`] and encode
//! its results; all business rules live in the application layer.
//!
//! [`LifecycleManager`]: crate::application::lifecycle::LifecycleManager

pub mod dto;
pub mod error;
pub mod handlers;

use crate::error::Result;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use handlers::SharedManager;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

/// CORS policy for the browser frontend at `allowed_origin`.
///
/// Credentials are allowed, so the origin, methods and headers are listed
/// explicitly rather than wildcarded.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
}

pub fn router(manager: SharedManager, cors: CorsLayer) -> Router {
    Router::new()
        .route("/create-payment", post(handlers::create_payment))
        .route("/verify-payment", post(handlers::verify_payment))
        .route("/payment-status/:order_id", get(handlers::payment_status))
        .layer(cors)
        .with_state(manager)
}

/// Serves the API on `listener` until `shutdown` resolves, then drains
/// in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    manager: SharedManager,
    allowed_origin: HeaderValue,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(addr = %addr, allowed_origin = ?allowed_origin, "Payment service listening");

    axum::serve(listener, router(manager, cors_layer(allowed_origin)))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
