//! HTTP server binary.
//!
//! Business logic lives in the `api` module; this file handles transport
//! concerns (reading the request off the wire, writing the envelope back,
//! startup and shutdown).

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::{Json, Router};
use postboard::api::{self, ApiRequest, AppState, ResponseBody};
use postboard::config::Config;
use postboard::upstream::JsonPlaceholderUpstream;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Requests with a larger body are rejected before decoding.
const MAX_BODY_BYTES: usize = 1024 * 1024;

type ServerState = Arc<AppState<JsonPlaceholderUpstream>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let upstream = Arc::new(JsonPlaceholderUpstream::new()?);
    let state: ServerState = Arc::new(AppState::new(upstream));

    let app = Router::new()
        .fallback(dispatch)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");

    Ok(())
}

/// Adapt the incoming axum request to an `ApiRequest`, route it, and write
/// the envelope back with its own status code.
async fn dispatch(
    State(state): State<ServerState>,
    request: Request,
) -> (StatusCode, Json<ResponseBody>) {
    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, "failed to read request body");
            return into_http(api::BAD_REQUEST);
        }
    };

    let body = if bytes.is_empty() {
        None
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, "request body is not valid utf-8");
                return into_http(api::BAD_REQUEST);
            }
        }
    };

    let api_request = ApiRequest {
        method: parts.method.as_str().to_string(),
        path: parts.uri.path().to_string(),
        body,
    };

    into_http(api::handle(&api_request, &state).await)
}

fn into_http(envelope: ResponseBody) -> (StatusCode, Json<ResponseBody>) {
    let status = StatusCode::from_u16(envelope.status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope))
}

/// Resolve when the process receives Ctrl+C or SIGTERM, letting the server
/// stop accepting connections while in-flight requests finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
