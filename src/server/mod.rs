pub mod handlers;

use crate::adapters::HttpTransport;
use crate::config::ServerConfig;
use crate::core::{ContactTransport, Forwarder};
use crate::utils::error::Result;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Extra time the whole request may take beyond the downstream timeout, so
/// the downstream timeout fires first and still yields a JSON body.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Upper bound for a contact form body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the HTTP router around a forwarder.
pub fn router<T: ContactTransport + 'static>(forwarder: Forwarder<T>) -> Router {
    let cors = build_cors_layer(forwarder.config());
    let request_timeout = forwarder.config().timeout() + REQUEST_TIMEOUT_MARGIN;

    Router::new()
        .route("/health", get(handlers::health::<T>))
        .route("/api/contact", post(handlers::contact::<T>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(Arc::new(forwarder))
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let transport = HttpTransport::new(config.timeout())?;
    let addr = config.bind_address();
    let app = router(Forwarder::new(config, transport));

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    tracing::info!(%addr, "Contact relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Contact relay stopped");
    Ok(())
}

fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}': {}", o, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
