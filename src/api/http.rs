//! HTTP transport - maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `POST /:command` - dispatch a command. Body = JSON input, request headers → Session.
//! - `POST /auth.login` - the one command that needs no bearer token.
//! - `GET /health` - unauthenticated, returns `{ "ok": true, "commands": [...] }`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::service::Service;
use super::session::Session;
use crate::store::EntityStore;

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<S: EntityStore + 'static>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route("/:command", post(command_handler::<S>))
        .with_state(service)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<S, F>(
    service: Arc<Service<S>>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: EntityStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_handler<S: EntityStore + 'static>(
    State(service): State<Arc<Service<S>>>,
) -> impl IntoResponse {
    Json(json!({ "ok": true, "commands": service.commands() }))
}

async fn command_handler<S: EntityStore + 'static>(
    State(service): State<Arc<Service<S>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    let session = session_from_headers(&headers);
    match service.dispatch(&command, input, session) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!(%command, error = %e, "command failed");
            }
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// Header names from axum are already lowercase.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let variables: HashMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect();
    Session::from_map(variables)
}
