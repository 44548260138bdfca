//! HTTP service exposing the bounded model checker: `GET /` (liveness) and
//! `POST /solve/` (the actual solve). Shaped after the teacher's
//! `tinyzkp_api` binary: tracing init, a `TraceLayer`-wrapped router, a
//! `TcpListener` handed to `axum::serve`.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pagetrace::{ApiError, Config, SolverRequest, SolverResponse};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "pagetrace=info,tower_http=info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env();
    info!(addr = %config.addr, k = config.trace_len, "starting pagetrace server");

    let state = AppState { config: Arc::new(config.clone()) };

    let app = Router::new()
        .route("/", get(health))
        .route("/solve/", post(solve))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn solve(
    State(state): State<AppState>,
    body: Result<Json<SolverRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<SolverResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::MalformedJson(e.to_string()))?;

    pagetrace::validate::validate(&req)?;

    let cfg = state.config.clone();
    let timeout = cfg.solver_timeout;
    let solved = tokio::time::timeout(
        timeout,
        tokio::task::spawn_blocking(move || pagetrace::solve(&req, &cfg)),
    )
    .await;

    match solved {
        Err(_elapsed) => Err(ApiError::Timeout),
        Ok(Err(join_err)) => {
            error!(%join_err, "solver task panicked");
            Err(ApiError::Backend(pagetrace::backend::BackendError::NoModel))
        }
        Ok(Ok(result)) => Ok(Json(result?)),
    }
}
