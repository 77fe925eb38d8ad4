//! Subcommand implementations.

use hlx_core::Action;
use hlx_exchange::{Exchange, InfoClient, InfoRequest};
use serde_json::Value;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Parse an action from JSON text.
///
/// Known shapes become typed actions; anything else is passed through with
/// its key order intact.
pub fn parse_action(json: &str) -> AppResult<Action> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| AppError::InvalidAction(e.to_string()))?;
    if !value.is_object() {
        return Err(AppError::InvalidAction(
            "action must be a JSON object".to_string(),
        ));
    }
    if value.get("type").and_then(Value::as_str).is_none() {
        return Err(AppError::InvalidAction(
            "action must have a string \"type\"".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| AppError::InvalidAction(e.to_string()))
}

/// Sign and submit one action; returns the decoded response body.
pub async fn submit(exchange: &Exchange, action: Action) -> AppResult<Value> {
    let kind = action.kind();
    let response: Value = exchange.execute(action).await?;
    info!(
        kind = %kind,
        status = response.get("status").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
        "Action submitted"
    );
    Ok(response)
}

/// Run an `/info` query.
pub async fn query_info(client: &InfoClient, request: &InfoRequest) -> AppResult<Value> {
    Ok(client.query(request).await?)
}
