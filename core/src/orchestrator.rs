use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::transport::EvaluationTransport;
use crate::types::{
    EvaluationRequest, EvaluationResult, EvaluationState, ReportFile, RequestPhase,
    SUPPORTED_MODELS,
};

/// Shown when any of the three inputs is missing; mirrors the single
/// combined alert the UI renders.
const VALIDATION_MESSAGE: &str = "Select files, enter a prompt, and choose a model.";

/// Fallback when the transport fails without a server-provided message.
const GENERIC_FAILURE_MESSAGE: &str = "Evaluation request failed.";

#[derive(Debug, Default)]
struct Inputs {
    files: Vec<ReportFile>,
    prompt: String,
    model: Option<String>,
}

impl Inputs {
    /// A request is built only when every precondition holds; otherwise the
    /// submission fails locally and the transport is never called.
    fn validate(&self) -> Option<EvaluationRequest> {
        let model = self.model.as_deref()?;
        if !SUPPORTED_MODELS.contains(&model) {
            return None;
        }
        if self.files.is_empty() || self.prompt.trim().is_empty() {
            return None;
        }
        Some(EvaluationRequest {
            files: self.files.clone(),
            prompt: self.prompt.clone(),
            model: model.to_string(),
        })
    }
}

/// Owns the evaluation request lifecycle: validates inputs, drives
/// Idle → Validating → Submitting → Succeeded/Failed, and publishes each
/// transition through a `watch` channel. One instance per UI session.
///
/// No error value escapes `submit`; callers observe state.
pub struct RequestOrchestrator<T: EvaluationTransport> {
    transport: T,
    inputs: RwLock<Inputs>,
    state_tx: watch::Sender<EvaluationState>,
    seq: AtomicU64,
}

impl<T: EvaluationTransport> RequestOrchestrator<T> {
    pub fn new(transport: T) -> Self {
        let (state_tx, _) = watch::channel(EvaluationState::idle());
        Self {
            transport,
            inputs: RwLock::new(Inputs::default()),
            state_tx,
            seq: AtomicU64::new(0),
        }
    }

    /// Observe state transitions. Receivers always see the latest snapshot;
    /// intermediate phases may coalesce.
    pub fn subscribe(&self) -> watch::Receiver<EvaluationState> {
        self.state_tx.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> EvaluationState {
        self.state_tx.borrow().clone()
    }

    // Input setters: pure updates, allowed in any phase. An in-flight
    // request is not cancelled or affected.

    pub async fn set_files(&self, files: Vec<ReportFile>) {
        self.inputs.write().await.files = files;
    }

    pub async fn set_prompt(&self, prompt: impl Into<String>) {
        self.inputs.write().await.prompt = prompt.into();
    }

    pub async fn set_model(&self, model: impl Into<String>) {
        self.inputs.write().await.model = Some(model.into());
    }

    /// Run one submission to a terminal state. A call made while a previous
    /// submission is still in flight is a no-op, so a host that drives one
    /// event at a time never has two concurrent transport calls.
    ///
    /// Threaded callers can race past the entry check during the input-lock
    /// suspension (it runs before `Submitting` is published); the sequence
    /// guard still ensures only the latest submission's resolution is
    /// applied.
    pub async fn submit(&self) {
        if self.state_tx.borrow().phase == RequestPhase::Submitting {
            debug!(target = "orchestrator", "submit ignored: request already in flight");
            return;
        }

        self.publish(RequestPhase::Validating, None, Vec::new());
        let request = match self.inputs.read().await.validate() {
            Some(request) => request,
            None => {
                info!(target = "orchestrator", "submission rejected by validation");
                self.publish(
                    RequestPhase::Failed,
                    Some(VALIDATION_MESSAGE.to_string()),
                    Vec::new(),
                );
                return;
            }
        };

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(RequestPhase::Submitting, None, Vec::new());

        let outcome = self.transport.evaluate(&request).await;

        // Latest-wins: a superseded submission must not corrupt later state.
        if self.seq.load(Ordering::SeqCst) != seq {
            warn!(target = "orchestrator", seq, "discarding stale evaluation response");
            return;
        }

        match outcome {
            Ok(response) => {
                info!(
                    target = "orchestrator",
                    results = response.results.len(),
                    "evaluation succeeded"
                );
                self.publish(RequestPhase::Succeeded, None, response.results);
            }
            Err(err) => {
                warn!(target = "orchestrator", error = %err, "evaluation failed");
                let message = err
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                self.publish(RequestPhase::Failed, Some(message), Vec::new());
            }
        }
    }

    fn publish(&self, phase: RequestPhase, error: Option<String>, results: Vec<EvaluationResult>) {
        self.state_tx.send_replace(EvaluationState {
            phase,
            error,
            results,
            updated_at_ms: chrono::Utc::now().timestamp_millis(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EvaluationResponse;
    use crate::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn result(id: &str, score: f64) -> EvaluationResult {
        EvaluationResult {
            id: id.to_string(),
            score,
            summary: String::new(),
        }
    }

    // The first transport call parks until released; later calls answer at
    // once, so an earlier submission resolves after a newer one
    #[derive(Clone)]
    struct OutOfOrderTransport {
        calls: Arc<AtomicUsize>,
        first_gate: Arc<Notify>,
        first_batch: Vec<EvaluationResult>,
        later_batch: Vec<EvaluationResult>,
    }

    #[async_trait]
    impl EvaluationTransport for OutOfOrderTransport {
        async fn evaluate(
            &self,
            _request: &EvaluationRequest,
        ) -> Result<EvaluationResponse, TransportError> {
            let idx = self.calls.fetch_add(1, Ordering::SeqCst);
            if idx == 0 {
                self.first_gate.notified().await;
                Ok(EvaluationResponse {
                    results: self.first_batch.clone(),
                })
            } else {
                Ok(EvaluationResponse {
                    results: self.later_batch.clone(),
                })
            }
        }
    }

    #[tokio::test]
    async fn superseded_submission_resolution_is_discarded() {
        let transport = OutOfOrderTransport {
            calls: Arc::new(AtomicUsize::new(0)),
            first_gate: Arc::new(Notify::new()),
            first_batch: vec![result("stale", 1.0)],
            later_batch: vec![result("latest", 9.0)],
        };
        let probe = transport.clone();

        let orch = Arc::new(RequestOrchestrator::new(transport));
        orch.set_files(vec![ReportFile::new("report.txt", b"blob".to_vec())])
            .await;
        orch.set_prompt("Evaluate clarity").await;
        orch.set_model("claude").await;

        // Hold the input lock so both submissions pass the entry check
        // before either publishes `Submitting`
        let hold = orch.inputs.write().await;
        let first = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.submit().await })
        };
        let second = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.submit().await })
        };
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert_eq!(orch.state().phase, RequestPhase::Validating);
        drop(hold);

        // One call parks at the gate; the other carries the latest sequence
        // number and resolves immediately
        while probe.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        let state = orch.state();
        assert_eq!(state.phase, RequestPhase::Succeeded);
        assert_eq!(state.results, vec![result("latest", 9.0)]);

        // Releasing the parked call must not overwrite the newer outcome
        probe.first_gate.notify_one();
        first.await.unwrap();
        second.await.unwrap();

        let state = orch.state();
        assert_eq!(state.phase, RequestPhase::Succeeded);
        assert_eq!(state.results, vec![result("latest", 9.0)]);
        assert_eq!(state.error, None);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }
}
