//! End-to-end tests against a local HTTP server with the real signer.

use std::sync::Arc;

use hlx_core::Action;
use hlx_exchange::{
    Exchange, ExchangeConfig, ExchangeError, ExchangeOption, InfoRequest, OrderStatus,
};
use hlx_signer::{KeyManager, SignRequest, SignatureProvider, Signer};
use parking_lot::Mutex;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// Well-known test key (Anvil/Hardhat account #0)
const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn signer() -> Arc<Signer> {
    let key_manager = KeyManager::from_hex(TEST_KEY, None).expect("test key");
    Arc::new(Signer::new(Arc::new(key_manager)))
}

fn config(server: &MockServer, options: Vec<ExchangeOption>) -> ExchangeConfig {
    ExchangeConfig::default()
        .with(ExchangeOption::BaseUrl(server.uri()))
        .apply(options)
}

fn received_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("json body")
}

/// Shared buffer collecting formatted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_signed_envelope_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exchange"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [{"resting": {"oid": 42}}]}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signer = signer();
    let exchange = Exchange::new(
        &config(&server, vec![ExchangeOption::ExpiresAfter(Some(1_900_000_000_000))]),
        signer.clone(),
    )
    .unwrap();

    let response = exchange.schedule_cancel(Some(1_800_000_000_000)).await.unwrap();
    let statuses = response.statuses().unwrap();
    assert!(matches!(statuses[0], OrderStatus::Resting(_)));
    assert_eq!(statuses[0].oid(), Some(42));

    let requests = server.received_requests().await.unwrap();
    let body = received_body(&requests[0]);
    assert_eq!(
        body["action"],
        json!({"type": "scheduleCancel", "time": 1_800_000_000_000u64})
    );
    assert_eq!(body["expiresAfter"], 1_900_000_000_000u64);
    assert!(body.get("vaultAddress").is_none());

    // Re-sign the posted action with the posted nonce: same signature
    let action: Action = serde_json::from_value(body["action"].clone()).unwrap();
    let expected = signer
        .sign(SignRequest {
            action: &action,
            vault_address: None,
            nonce: body["nonce"].as_u64().unwrap(),
            expires_after: Some(1_900_000_000_000),
            // Local server URL is not the production URL
            is_mainnet: false,
        })
        .await
        .unwrap();
    assert_eq!(body["signature"], serde_json::to_value(expected).unwrap());
}

#[tokio::test]
async fn test_invalid_vault_is_signing_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let exchange = Exchange::new(
        &config(&server, vec![ExchangeOption::VaultAddress("not-an-address".to_string())]),
        signer(),
    )
    .unwrap();

    let err = exchange.execute::<Value>(Action::noop()).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Signing(_)));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exchange"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let exchange = Exchange::new(&config(&server, vec![]), signer()).unwrap();

    let err = exchange.cancel(vec![]).await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exchange"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let exchange = Exchange::new(&config(&server, vec![]), signer()).unwrap();

    match exchange.cancel(vec![]).await.unwrap_err() {
        ExchangeError::Decode { body, .. } => assert_eq!(body, "Internal Server Error"),
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_info_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"universe": []})))
        .expect(1)
        .mount(&server)
        .await;

    let exchange = Exchange::new(
        &config(&server, vec![ExchangeOption::DebugMode]),
        signer(),
    )
    .unwrap();

    let meta: Value = exchange.info().query(&InfoRequest::new("meta")).await.unwrap();
    assert_eq!(meta, json!({"universe": []}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(received_body(&requests[0]), json!({"type": "meta"}));
}

#[tokio::test]
async fn test_debug_log_omits_signature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exchange"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "response": {"type": "default"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let exchange =
        Exchange::new(&config(&server, vec![ExchangeOption::DebugMode]), signer()).unwrap();
    let _: Value = exchange.execute(Action::noop()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = received_body(&requests[0]);
    let r = body["signature"]["r"].as_str().unwrap();
    let s = body["signature"]["s"].as_str().unwrap();

    let output = logs.contents();
    assert!(output.contains("POST"));
    assert!(output.contains("noop"));
    assert!(!output.contains(r));
    assert!(!output.contains(s));
}
