// ABOUTME: HTTP service exposing the Glimpse preview engine.
// ABOUTME: Serves GET /preview?url=... with a JSON envelope and maps preview errors to status codes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use glimpse_preview::{BrowserSession, Client, PreviewError};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glimpse-server")]
#[command(about = "Serve link previews over HTTP")]
struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8712)]
    port: u16,
}

struct AppState {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PreviewQuery {
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Browser startup is fatal: the service is useless without it.
    let session = Arc::new(BrowserSession::open().await?);
    let client = Client::builder().session(session.clone()).build();
    let state = Arc::new(AppState { client });

    let app = Router::new()
        .route("/preview", get(get_preview))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    session.close().await;
    info!("server shutdown");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}

async fn get_preview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let preview = state.client.build(&query.url).await?;

    Ok(Json(json!({ "data": { "preview": preview } })))
}

/// Client-facing error: a status code and a fixed message. The underlying
/// cause is logged here, never leaked to the response body.
struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl From<PreviewError> for ApiError {
    fn from(err: PreviewError) -> Self {
        if err.is_not_found() {
            Self {
                status: StatusCode::NOT_FOUND,
                message: "not found",
            }
        } else if err.is_invalid_url() {
            Self {
                status: StatusCode::BAD_REQUEST,
                message: "invalid url",
            }
        } else {
            error!(error = %err, "failed to build preview");
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "internal server error",
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "message": self.message,
                "status": self.status.as_u16(),
            })),
        )
            .into_response()
    }
}
