// Report Evaluator Core Library
// Evaluation request orchestrator and prompt repository client

pub mod config;
pub mod orchestrator;
pub mod repository;
pub mod transport;
pub mod types;

// Export core types
pub use config::ApiConfig;
pub use orchestrator::RequestOrchestrator;
pub use repository::PromptRepository;
pub use transport::{
    EvaluationTransport, HttpEvaluationTransport, HttpPromptTransport, PromptTransport,
};
pub use types::{
    EvaluationRequest, EvaluationResponse, EvaluationResult, EvaluationState, Prompt, ReportFile,
    RequestPhase, SUPPORTED_MODELS,
};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with an error body carrying a user-facing message.
    #[error("{0}")]
    Server(String),

    /// Network or decode failure with no message suitable for the user.
    #[error("transport failure: {0}")]
    Network(String),
}

impl TransportError {
    /// User-facing message supplied by the server, when one exists.
    /// Callers substitute their own default for messageless failures.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Server(msg) => Some(msg),
            TransportError::Network(_) => None,
        }
    }
}

/// Failure of a prompt store operation, already translated into a
/// user-facing message (server-provided when available, otherwise an
/// operation-specific default).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct RepositoryError {
    pub message: String,
    #[source]
    pub source: TransportError,
}
