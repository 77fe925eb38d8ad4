//! HTTP transport seam.
//!
//! The executor only needs "post this JSON body to a path, give me the raw
//! response bytes". Response decoding stays with the caller so that a
//! malformed body surfaces as a decode error, not a transport error.

use std::sync::Arc;

use hlx_signer::BoxFuture;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Posts JSON bodies to API paths.
pub trait Transport: Send + Sync {
    /// POST `body` to `path` and return the raw 2xx response body.
    fn post<'a>(&'a self, path: &'a str, body: Value)
        -> BoxFuture<'a, Result<Vec<u8>, TransportError>>;
}

/// Arc wrapper for Transport trait objects.
pub type DynTransport = Arc<dyn Transport>;

// =============================================================================
// HttpTransport
// =============================================================================

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    debug: bool,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Client(format!("Failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            debug: config.debug,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn post<'a>(
        &'a self,
        path: &'a str,
        body: Value,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            let url = self.url(path);
            if self.debug {
                debug!(url = %url, body = %loggable(&body), "POST");
            }

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| TransportError::Request(format!("Failed to read body: {e}")))?;

            if self.debug {
                debug!(
                    url = %url,
                    status = status.as_u16(),
                    body = %String::from_utf8_lossy(&bytes),
                    "Response"
                );
            }

            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }

            Ok(bytes.to_vec())
        })
    }
}

/// Copy of `body` for debug logs, with the signature replaced.
fn loggable(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(signature) = body.get_mut("signature") {
        *signature = Value::String("<redacted>".to_string());
    }
    body
}

// =============================================================================
// MockTransport
// =============================================================================

/// A post observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPost {
    pub path: String,
    pub body: Value,
}

/// Mock transport for testing.
#[derive(Debug)]
pub struct MockTransport {
    /// Recorded posts for verification.
    posts: parking_lot::Mutex<Vec<RecordedPost>>,
    /// Next result to return.
    next_result: parking_lot::Mutex<Result<Vec<u8>, TransportError>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a mock answering `{"status":"ok","response":{"type":"default"}}`.
    pub fn new() -> Self {
        Self {
            posts: parking_lot::Mutex::new(Vec::new()),
            next_result: parking_lot::Mutex::new(Ok(
                br#"{"status":"ok","response":{"type":"default"}}"#.to_vec()
            )),
        }
    }

    /// Set the next result to return.
    pub fn set_next_result(&self, result: Result<Vec<u8>, TransportError>) {
        *self.next_result.lock() = result;
    }

    /// Answer with the given body.
    pub fn respond_with(&self, body: impl Into<Vec<u8>>) {
        self.set_next_result(Ok(body.into()));
    }

    /// Answer with the given JSON value.
    pub fn respond_with_json(&self, body: &Value) {
        self.respond_with(body.to_string());
    }

    pub fn get_posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().clone()
    }

    pub fn clear_posts(&self) {
        self.posts.lock().clear();
    }
}

impl Transport for MockTransport {
    fn post<'a>(
        &'a self,
        path: &'a str,
        body: Value,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            self.posts.lock().push(RecordedPost {
                path: path.to_string(),
                body,
            });
            self.next_result.lock().clone()
        })
    }
}
