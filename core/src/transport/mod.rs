//! Transport boundary: the HTTP seams the core calls through.
//!
//! This module provides:
//! - `EvaluationTransport` and `PromptTransport` traits the components are
//!   generic over
//! - `HttpEvaluationTransport` for the multipart evaluation endpoint
//! - `HttpPromptTransport` for the REST prompt store

mod evaluation;
mod prompts;

pub use evaluation::HttpEvaluationTransport;
pub use prompts::HttpPromptTransport;

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use crate::types::{EvaluationRequest, EvaluationResponse, Prompt};
use crate::TransportError;

/// Single operation the evaluation backend exposes.
#[async_trait]
pub trait EvaluationTransport: Send + Sync {
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResponse, TransportError>;
}

/// The five operations of the remote prompt store. Each implementation call
/// issues exactly one HTTP request and retains nothing between calls.
#[async_trait]
pub trait PromptTransport: Send + Sync {
    async fn list(&self) -> Result<Vec<Prompt>, TransportError>;
    async fn save(&self, prompt: &Prompt) -> Result<(), TransportError>;
    async fn get_by_name(&self, name: &str) -> Result<Prompt, TransportError>;
    async fn update(&self, name: &str, value: &str) -> Result<(), TransportError>;
    async fn delete(&self, name: &str) -> Result<(), TransportError>;
}

pub(crate) fn build_http_client(timeout_ms: u64) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))
}

/// Map a non-success response into a `TransportError`, preferring the
/// `{ "error": … }` body shape the backend uses for failures. Anything
/// without a usable message becomes a messageless `Network` error so the
/// caller substitutes its own default.
pub(crate) async fn error_from_response(resp: reqwest::Response) -> TransportError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    if let Ok(val) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(msg) = val.get("error").and_then(|e| e.as_str()) {
            if !msg.is_empty() {
                return TransportError::Server(msg.to_string());
            }
        }
    }
    warn!(target: "transport", %status, body = %body, "HTTP error response without error message");
    TransportError::Network(format!("status {status}"))
}

// Module for URL path-segment encoding (using percent encoding)
pub(crate) mod urlencoding {
    pub fn encode(s: &str) -> String {
        s.chars()
            .map(|c| match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => c.to_string(),
                _ => {
                    // Percent-encode UTF-8 bytes, including spaces (path
                    // segment, not query string)
                    let mut buf = [0u8; 4];
                    let bytes = c.encode_utf8(&mut buf).as_bytes();
                    bytes.iter().map(|b| format!("%{:02X}", b)).collect()
                }
            })
            .collect()
    }
}
