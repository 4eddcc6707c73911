//! Relay server: HTTP JSON-RPC endpoint over a shared channel registry.

use crate::domain::config::RelayConfig;
use crate::domain::error::{ApiError, RelayError};
use crate::domain::registry::ChannelRegistry;
use crate::middleware::{RelayMetrics, RequestTimer, TracingLayer};
use crate::router::{route_method, AppState};
use crate::rpc::BroadcastRpc;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error, info, warn};

/// Broadcast relay server
pub struct RelayServer {
    config: RelayConfig,
    registry: Arc<ChannelRegistry>,
    metrics: Arc<RelayMetrics>,
}

impl RelayServer {
    /// Create a relay server over the given registry
    pub fn new(config: RelayConfig, registry: Arc<ChannelRegistry>) -> Result<Self, RelayError> {
        config.validate()?;

        Ok(Self {
            config,
            registry,
            metrics: Arc::new(RelayMetrics::new()),
        })
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<RelayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the HTTP router
    pub fn build_router(&self) -> Router {
        let broadcast = BroadcastRpc::new(
            Arc::clone(&self.registry),
            self.config.receive_timeout,
            Arc::clone(&self.metrics),
        );
        let state = AppState {
            broadcast: Arc::new(broadcast),
            metrics: Arc::clone(&self.metrics),
            max_batch_size: self.config.max_batch_size,
        };

        Router::new()
            .route("/", post(handle_json_rpc))
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_handler))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(self.config.max_request_size))
            .layer(TracingLayer::new())
            .with_state(state)
    }

    /// Bind the listener and start serving in the background
    pub async fn bind(self) -> Result<RunningRelay, RelayError> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| RelayError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        let router = self.build_router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        info!(addr = %local_addr, "Starting relay server");
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(RunningRelay {
            local_addr,
            shutdown_tx,
            task,
        })
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> Result<(), RelayError> {
        let mut running = self.bind().await?;

        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                running.shutdown().await
            }
            result = &mut running.task => {
                error!(addr = %running.local_addr, "Relay server stopped unexpectedly");
                flatten_join(result)
            }
        }
    }
}

/// Handle to a relay server serving in the background
pub struct RunningRelay {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningRelay {
    /// Address the server is listening on
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(self) -> Result<(), RelayError> {
        info!(addr = %self.local_addr, "Shutting down relay server");
        let _ = self.shutdown_tx.send(());
        flatten_join(self.task.await)
    }
}

fn flatten_join(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), RelayError> {
    match result {
        Ok(served) => served.map_err(RelayError::Io),
        Err(e) => Err(RelayError::Io(std::io::Error::other(e))),
    }
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "rpc-channel-server",
        "version": crate::VERSION,
        "channels": state.broadcast.channel_count(),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}

/// Handle JSON-RPC request
async fn handle_json_rpc(State(state): State<AppState>, body: String) -> Response {
    let request: serde_json::Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(error_response(
                    serde_json::Value::Null,
                    &ApiError::parse_error(e.to_string()),
                )),
            )
                .into_response();
        }
    };

    let response = match request {
        serde_json::Value::Array(requests) => {
            if requests.is_empty() {
                Some(error_response(
                    serde_json::Value::Null,
                    &ApiError::invalid_request("empty batch"),
                ))
            } else if requests.len() > state.max_batch_size {
                Some(error_response(
                    serde_json::Value::Null,
                    &ApiError::invalid_request(format!(
                        "batch of {} exceeds limit of {}",
                        requests.len(),
                        state.max_batch_size
                    )),
                ))
            } else {
                // Calls in a batch run concurrently
                let responses: Vec<_> = futures::future::join_all(
                    requests.iter().map(|req| process_single_request(&state, req)),
                )
                .await
                .into_iter()
                .flatten()
                .collect();

                (!responses.is_empty()).then_some(serde_json::Value::Array(responses))
            }
        }
        single => process_single_request(&state, &single).await,
    };

    match response {
        Some(body) => (StatusCode::OK, Json(body)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Process a single JSON-RPC call. Returns `None` for notifications.
async fn process_single_request(
    state: &AppState,
    request: &serde_json::Value,
) -> Option<serde_json::Value> {
    let Some(object) = request.as_object() else {
        return Some(error_response(
            serde_json::Value::Null,
            &ApiError::invalid_request("request must be an object"),
        ));
    };

    // No id member means notification: execute, but never answer
    let id = object.get("id").cloned();
    if let Some(ref id_val) = id {
        if !(id_val.is_string() || id_val.is_number() || id_val.is_null()) {
            return Some(error_response(
                serde_json::Value::Null,
                &ApiError::invalid_request("id must be string, number or null"),
            ));
        }
    }

    // Missing or non-string method is an invalid request, even without an id
    let Some(method) = object.get("method").and_then(|m| m.as_str()) else {
        return Some(error_response(
            id.unwrap_or(serde_json::Value::Null),
            &ApiError::invalid_request("method must be a string"),
        ));
    };
    let params = object.get("params");

    let timer = RequestTimer::new(Arc::clone(&state.metrics));
    let result = route_method(state, method, params).await;
    timer.finish(result.is_ok());

    let Some(id) = id else {
        state.metrics.record_notification();
        if let Err(e) = result {
            debug!(method, error = %e, "Notification failed");
        }
        return None;
    };

    Some(match result {
        Ok(value) => serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": value
        }),
        Err(e) => error_response(id, &e),
    })
}

fn error_response(id: serde_json::Value, error: &ApiError) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error
    })
}
