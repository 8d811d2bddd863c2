use serde::{Deserialize, Serialize};

/// Model identifiers the evaluation backend accepts, in UI display order.
pub const SUPPORTED_MODELS: &[&str] = &["claude", "local"];

/// An uploaded report: opaque bytes plus the filename the multipart part
/// is labelled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A fully validated evaluation request: non-empty files, non-empty prompt,
/// and a model from [`SUPPORTED_MODELS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub files: Vec<ReportFile>,
    pub prompt: String,
    pub model: String,
}

/// Per-file score produced by the evaluation backend. Immutable once
/// received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    pub id: String,
    pub score: f64,
    pub summary: String,
}

/// One batch of results per request, in the order the backend returned them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResponse {
    pub results: Vec<EvaluationResult>,
}

/// A named, reusable prompt owned by the remote store. Never cached locally;
/// every read re-fetches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prompt {
    pub name: String,
    pub value: String,
}

/// Lifecycle stage of the orchestrator. Exactly one is active at a time,
/// mutated only through the orchestrator's operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Snapshot of the orchestrator's observable state, published on every
/// phase transition.
#[derive(Debug, Clone)]
pub struct EvaluationState {
    pub phase: RequestPhase,
    pub error: Option<String>,
    pub results: Vec<EvaluationResult>,
    pub updated_at_ms: i64,
}

impl EvaluationState {
    pub(crate) fn idle() -> Self {
        Self {
            phase: RequestPhase::Idle,
            error: None,
            results: Vec::new(),
            updated_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}
