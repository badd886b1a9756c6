//! Liveness endpoint.
//!
//! `GET /` and `GET /health` report the supervisor's restart count and the
//! time of the last receive-loop failure.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

use super::runtime::SupervisorStats;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: &'static str,
    pub restarts: u64,
    /// RFC 3339, absent until the first failure.
    pub last_failure: Option<String>,
}

impl HealthReport {
    fn from_stats(stats: &SupervisorStats) -> Self {
        Self {
            status: "ok",
            restarts: stats.restarts(),
            last_failure: stats.last_failure().map(|t| t.to_rfc3339()),
        }
    }
}

async fn health(State(stats): State<Arc<SupervisorStats>>) -> Json<HealthReport> {
    Json(HealthReport::from_stats(&stats))
}

pub fn router(stats: Arc<SupervisorStats>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .with_state(stats)
}

/// Serve the health endpoint until the process exits.
pub async fn serve(port: u16, stats: Arc<SupervisorStats>) -> anyhow::Result<()> {
    let address = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(address).await?;
    info!("Health endpoint listening on {}", address);
    axum::serve(listener, router(stats)).await?;
    Ok(())
}
