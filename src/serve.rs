//! HTTP endpoint that regenerates the download page on demand.
//!
//! Requests are expected to be authenticated by the reverse proxy in front of
//! this server.

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
};
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::index::{IndexOptions, ReleaseSource, update_index};
use crate::runtime::Runtime;

/// Default listen address of the update endpoint.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

pub struct ServeState<R: Runtime, S: ReleaseSource> {
    runtime: R,
    source: S,
    options: IndexOptions,
    // one regeneration at a time; both write the same files
    updating: Mutex<()>,
}

impl<R: Runtime, S: ReleaseSource> ServeState<R, S> {
    pub fn new(runtime: R, source: S, options: IndexOptions) -> Self {
        Self {
            runtime,
            source,
            options,
            updating: Mutex::new(()),
        }
    }
}

pub fn router<R, S>(state: Arc<ServeState<R, S>>) -> Router
where
    R: Runtime + 'static,
    S: ReleaseSource + 'static,
{
    Router::new()
        .route("/update", any(update_handler::<R, S>))
        .with_state(state)
}

async fn update_handler<R, S>(State(state): State<Arc<ServeState<R, S>>>) -> Response
where
    R: Runtime + 'static,
    S: ReleaseSource + 'static,
{
    let _guard = state.updating.lock().await;
    info!("Updating index");

    match update_index(&state.runtime, &state.source, &state.options).await {
        Ok(details) => (
            StatusCode::OK,
            format!(
                "Updated index with {} binaries from {}\n",
                details.binaries.len(),
                details.all_versions.join(", ")
            ),
        )
            .into_response(),
        Err(e) => {
            error!("Unable to update index: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}\n", e)).into_response()
        }
    }
}

/// Bind `addr` and serve until the process is stopped.
#[tracing::instrument(skip(state))]
pub async fn serve<R, S>(addr: SocketAddr, state: ServeState<R, S>) -> Result<()>
where
    R: Runtime + 'static,
    S: ReleaseSource + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(state)))
        .await
        .context("Server error")
}
