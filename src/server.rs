//! HTTP surface: the dashboard asset at `/` and the snapshot JSON at
//! `/api/data`. Handlers only read from the store; they never block on
//! sampling.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use color_eyre::Result;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::system::store::SnapshotStore;

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
}

pub fn build_router(store: Arc<SnapshotStore>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/data", get(api_data))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Always 200: probe failures surface as null/default fields inside the
/// snapshot, never as an HTTP error.
async fn api_data(State(state): State<AppState>) -> Response {
    let snapshot = state.store.current();
    Json(snapshot.as_ref()).into_response()
}

pub async fn serve(
    addr: SocketAddr,
    store: Arc<SnapshotStore>,
    shutdown: CancellationToken,
) -> Result<()> {
    let app = build_router(store);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    Ok(())
}
