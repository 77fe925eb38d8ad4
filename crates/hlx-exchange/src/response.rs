//! `/exchange` response types.
//!
//! The executor is generic over its decode target; these types are the
//! default target used by the [`Exchange`](crate::Exchange) convenience
//! methods.

use serde::{Deserialize, Serialize};

/// Top-level `/exchange` response.
///
/// ```json
/// {"status": "ok", "response": {"type": "order", "data": {"statuses": [...]}}}
/// {"status": "err", "response": "Insufficient margin"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "response", rename_all = "lowercase")]
pub enum ExchangeResponse {
    Ok(ResponseDetails),
    Err(String),
}

/// Success details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDetails {
    /// Type of response (e.g., "order", "cancel", "default").
    #[serde(rename = "type")]
    pub response_type: String,
    /// Flexible JSON; order-like actions carry `{"statuses": [...]}`.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Per-order status inside `data.statuses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    /// `{"resting": {"oid": 12345}}`
    Resting(RestingOrder),
    /// `{"filled": {"totalSz": "0.02", "avgPx": "1891.4", "oid": 12345}}`
    Filled(FilledOrder),
    /// `{"error": "..."}`
    Error(String),
    /// `"success"` (cancels, modifies)
    Success,
    WaitingForFill,
    WaitingForTrigger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    pub oid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledOrder {
    pub total_sz: String,
    pub avg_px: String,
    pub oid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloid: Option<String>,
}

impl ExchangeResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Top-level rejection message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Err(message) => Some(message.as_str()),
        }
    }

    /// Parse `data.statuses`. Empty when the response carries none.
    pub fn statuses(&self) -> Result<Vec<OrderStatus>, serde_json::Error> {
        let Self::Ok(details) = self else {
            return Ok(Vec::new());
        };
        match details.data.get("statuses") {
            Some(statuses) => serde_json::from_value(statuses.clone()),
            None => Ok(Vec::new()),
        }
    }
}

impl OrderStatus {
    /// Exchange order id for resting or filled orders.
    pub fn oid(&self) -> Option<u64> {
        match self {
            Self::Resting(order) => Some(order.oid),
            Self::Filled(order) => Some(order.oid),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ok_response() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [{"resting": {"oid": 12345}}]}}
        }))
        .unwrap();

        assert!(response.is_ok());
        assert_eq!(response.error_message(), None);
        let statuses = response.statuses().unwrap();
        assert_eq!(
            statuses,
            vec![OrderStatus::Resting(RestingOrder {
                oid: 12345,
                cloid: None
            })]
        );
        assert_eq!(statuses[0].oid(), Some(12345));
    }

    #[test]
    fn test_parse_err_response() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "status": "err",
            "response": "User or API Wallet 0x0 does not exist."
        }))
        .unwrap();

        assert!(!response.is_ok());
        assert_eq!(
            response.error_message(),
            Some("User or API Wallet 0x0 does not exist.")
        );
        assert!(response.statuses().unwrap().is_empty());
    }

    #[test]
    fn test_parse_mixed_statuses() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [
                {"filled": {"totalSz": "0.02", "avgPx": "1891.4", "oid": 77747314}},
                {"error": "Order must have minimum value of $10."},
                "success",
                "waitingForTrigger"
            ]}}
        }))
        .unwrap();

        let statuses = response.statuses().unwrap();
        assert_eq!(statuses.len(), 4);
        match &statuses[0] {
            OrderStatus::Filled(filled) => {
                assert_eq!(filled.oid, 77747314);
                assert_eq!(filled.total_sz, "0.02");
                assert_eq!(filled.avg_px, "1891.4");
            }
            other => panic!("Expected Filled status, got {other:?}"),
        }
        assert!(statuses[1].is_error());
        assert_eq!(statuses[2], OrderStatus::Success);
        assert_eq!(statuses[3], OrderStatus::WaitingForTrigger);
    }

    #[test]
    fn test_default_response_without_data() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "default"}
        }))
        .unwrap();

        assert!(response.is_ok());
        assert!(response.statuses().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_status_is_error() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [{"bogus": 1}]}}
        }))
        .unwrap();

        assert!(response.statuses().is_err());
    }
}
