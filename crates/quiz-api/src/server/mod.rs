use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, Request, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use contracts::view::ShellView;
use contracts::{
    ApiError, CommandPayload, CommandResult, ErrorCode, Event, EventType, RunConfig, RunStatus,
    SCHEMA_VERSION_V1,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex};

use crate::{CreateRunError, EngineApi, EngineClock};

const DEFAULT_PAGE_SIZE: usize = 200;
const MAX_PAGE_SIZE: usize = 2000;
const TIMER_POLL_INTERVAL_MS: u64 = 250;

include!("error.rs");
include!("state.rs");
include!("routes/control.rs");
include!("routes/query.rs");
include!("routes/stream.rs");
include!("util.rs");

pub async fn serve(addr: SocketAddr) -> Result<(), ServerError> {
    let state = AppState::new();
    let app = router(state.clone());

    spawn_timer_poller(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "quiz api listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reveal and auto-finish timers are driven by the run's clock, not the OS;
/// this task polls the engine so they fire without a client request.
fn spawn_timer_poller(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(TIMER_POLL_INTERVAL_MS));
        loop {
            ticker.tick().await;

            let messages = {
                let mut inner = state.inner.lock().await;
                let fired = match inner.engine.as_mut() {
                    Some(engine) => engine.poll(),
                    None => 0,
                };

                if fired == 0 {
                    Vec::new()
                } else {
                    tracing::debug!(fired, "timer transitions applied");
                    let mut messages = collect_delta_messages(&mut inner);
                    if let Some(engine) = inner.engine.as_ref() {
                        messages.push(StreamMessage::run_status(&engine.status()));
                    }
                    messages
                }
            };

            broadcast_messages(&state, messages);
        }
    });
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/games", get(list_games))
        .route("/api/v1/runs", post(create_run))
        .route("/api/v1/runs/{run_id}/status", get(get_status))
        .route("/api/v1/runs/{run_id}/shell", get(get_shell))
        .route("/api/v1/runs/{run_id}/timeline", get(get_timeline))
        .route("/api/v1/runs/{run_id}/commands", get(get_commands))
        .route("/api/v1/runs/{run_id}/select", post(select_option))
        .route("/api/v1/runs/{run_id}/advance", post(advance_run))
        .route("/api/v1/runs/{run_id}/finish", post(finish_run))
        .route("/api/v1/runs/{run_id}/retry", post(retry_run))
        .route("/api/v1/runs/{run_id}/stream", get(stream_run))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}
