//! Method routing and parameter extraction for the relay's JSON-RPC API.

use crate::domain::error::ApiError;
use crate::middleware::RelayMetrics;
use crate::rpc::BroadcastRpc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub broadcast: Arc<BroadcastRpc>,
    pub metrics: Arc<RelayMetrics>,
    pub max_batch_size: usize,
}

/// Route a JSON-RPC method to its handler.
///
/// Parameters are accepted by position or by name:
/// - `send`: `[channel, message]` or `{"channel", "message"}`
/// - `getseq`: `[channel]` or `{"channel"}`
/// - `receive`: `[channel, fromseq]` or `{"channel", "fromseq"}`
pub async fn route_method(
    state: &AppState,
    method: &str,
    params: Option<&serde_json::Value>,
) -> Result<serde_json::Value, ApiError> {
    match method {
        "send" => {
            let channel: String = parse_param(params, 0, "channel")?;
            let message: serde_json::Value = parse_param(params, 1, "message")?;
            state.broadcast.send(&channel, message).await?;
            Ok(serde_json::Value::Null)
        }

        "getseq" => {
            let channel: String = parse_param(params, 0, "channel")?;
            let seq = state.broadcast.get_seq(&channel).await?;
            to_result(seq)
        }

        "receive" => {
            let channel: String = parse_param(params, 0, "channel")?;
            let from_seq: u64 = parse_param(params, 1, "fromseq")?;
            let result = state.broadcast.receive(&channel, from_seq).await?;
            to_result(result)
        }

        _ => Err(ApiError::method_not_found(method)),
    }
}

fn to_result<T: Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Extract a required parameter by position (array params) or name
/// (object params).
fn parse_param<T: DeserializeOwned>(
    params: Option<&serde_json::Value>,
    index: usize,
    name: &str,
) -> Result<T, ApiError> {
    let param = params
        .and_then(|p| match p {
            serde_json::Value::Array(items) => items.get(index),
            serde_json::Value::Object(fields) => fields.get(name),
            _ => None,
        })
        .ok_or_else(|| {
            ApiError::invalid_params(format!("missing parameter '{}'", name))
                .with_data(serde_json::json!({ "param": name }))
        })?;

    serde_json::from_value(param.clone()).map_err(|e| {
        ApiError::invalid_params(format!("parameter '{}': {}", name, e))
            .with_data(serde_json::json!({ "param": name }))
    })
}
