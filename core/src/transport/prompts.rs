use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{build_http_client, error_from_response, urlencoding, PromptTransport};
use crate::config::ApiConfig;
use crate::types::Prompt;
use crate::TransportError;

/// Envelope the store wraps the collection in
#[derive(Debug, Deserialize)]
struct PromptListBody {
    prompts: Vec<Prompt>,
}

#[derive(Debug, Deserialize)]
struct PromptBody {
    prompt: Prompt,
}

/// HTTP transport for the remote prompt store, REST over the configured
/// base path.
pub struct HttpPromptTransport {
    http: reqwest::Client,
    base: String,
}

impl HttpPromptTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        Ok(Self {
            http: build_http_client(config.request_timeout_ms)?,
            base: config.prompts_url(),
        })
    }

    fn item_url(&self, name: &str) -> String {
        format!("{}/{}", self.base, urlencoding::encode(name))
    }

    async fn ack(resp: reqwest::Response) -> Result<(), TransportError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(resp).await)
        }
    }

    fn network(op: &str, e: reqwest::Error) -> TransportError {
        warn!(target: "prompt_transport", op, error = %e, "prompt store request failed");
        TransportError::Network(format!("{op} request failed: {e}"))
    }
}

#[async_trait]
impl PromptTransport for HttpPromptTransport {
    async fn list(&self) -> Result<Vec<Prompt>, TransportError> {
        debug!(target: "prompt_transport", url = %self.base, "GET prompt list");
        let resp = self
            .http
            .get(&self.base)
            .send()
            .await
            .map_err(|e| Self::network("list", e))?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: PromptListBody = resp
            .json()
            .await
            .map_err(|e| TransportError::Network(format!("failed to parse prompt list: {e}")))?;
        Ok(body.prompts)
    }

    async fn save(&self, prompt: &Prompt) -> Result<(), TransportError> {
        debug!(target: "prompt_transport", url = %self.base, name = %prompt.name, "POST prompt");
        let resp = self
            .http
            .post(&self.base)
            .json(prompt)
            .send()
            .await
            .map_err(|e| Self::network("save", e))?;
        Self::ack(resp).await
    }

    async fn get_by_name(&self, name: &str) -> Result<Prompt, TransportError> {
        let url = self.item_url(name);
        debug!(target: "prompt_transport", url = %url, "GET prompt");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::network("fetch", e))?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: PromptBody = resp
            .json()
            .await
            .map_err(|e| TransportError::Network(format!("failed to parse prompt: {e}")))?;
        Ok(body.prompt)
    }

    async fn update(&self, name: &str, value: &str) -> Result<(), TransportError> {
        let url = self.item_url(name);
        debug!(target: "prompt_transport", url = %url, "PUT prompt");
        let resp = self
            .http
            .put(&url)
            .json(&json!({ "value": value }))
            .send()
            .await
            .map_err(|e| Self::network("update", e))?;
        Self::ack(resp).await
    }

    async fn delete(&self, name: &str) -> Result<(), TransportError> {
        let url = self.item_url(name);
        debug!(target: "prompt_transport", url = %url, "DELETE prompt");
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::network("delete", e))?;
        Self::ack(resp).await
    }
}
