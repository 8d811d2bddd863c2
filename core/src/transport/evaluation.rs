use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use super::{build_http_client, error_from_response, EvaluationTransport};
use crate::config::ApiConfig;
use crate::types::{EvaluationRequest, EvaluationResponse};
use crate::TransportError;

/// HTTP transport for the evaluation endpoint: one multipart POST per
/// request carrying the model, the prompt, and every uploaded file.
pub struct HttpEvaluationTransport {
    http: reqwest::Client,
    url: String,
}

impl HttpEvaluationTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        Ok(Self {
            http: build_http_client(config.request_timeout_ms)?,
            url: config.evaluate_url(),
        })
    }
}

#[async_trait]
impl EvaluationTransport for HttpEvaluationTransport {
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResponse, TransportError> {
        debug!(
            target: "evaluation_transport",
            url = %self.url,
            model = %request.model,
            files = request.files.len(),
            "POST evaluation request"
        );

        let mut form = Form::new()
            .text("model", request.model.clone())
            .text("prompt", request.prompt.clone());
        for file in &request.files {
            form = form.part(
                "files",
                Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
            );
        }

        let resp = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(target: "evaluation_transport", error = %e, "evaluation request failed");
                TransportError::Network(format!("evaluation request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        resp.json::<EvaluationResponse>().await.map_err(|e| {
            warn!(target: "evaluation_transport", error = %e, "failed to parse evaluation response");
            TransportError::Network(format!("failed to parse evaluation response: {e}"))
        })
    }
}
