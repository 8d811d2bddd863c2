use tracing::{debug, warn};

use crate::transport::PromptTransport;
use crate::types::Prompt;
use crate::{RepositoryError, TransportError};

/// Stateless CRUD client over the remote prompt store. Every call issues
/// exactly one transport call, performs no retries, and caches nothing:
/// each read reflects the store's state at call time.
///
/// Failures are translated into `RepositoryError` with the server's message
/// forwarded verbatim when present, otherwise an operation-specific default.
pub struct PromptRepository<T: PromptTransport> {
    transport: T,
}

impl<T: PromptTransport> PromptRepository<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// All prompts, in store order.
    pub async fn list(&self) -> Result<Vec<Prompt>, RepositoryError> {
        debug!(target = "prompt_repository", "list prompts");
        self.transport
            .list()
            .await
            .map_err(|e| translate(e, "Failed to list prompts."))
    }

    /// Name collisions are the store's concern; nothing is validated here.
    pub async fn save(&self, prompt: &Prompt) -> Result<(), RepositoryError> {
        debug!(target = "prompt_repository", name = %prompt.name, "save prompt");
        self.transport
            .save(prompt)
            .await
            .map_err(|e| translate(e, "Failed to save prompt."))
    }

    /// "Not found" is the same failure kind as any other fetch error,
    /// distinguished only by the server's message.
    pub async fn get_by_name(&self, name: &str) -> Result<Prompt, RepositoryError> {
        debug!(target = "prompt_repository", name, "fetch prompt");
        self.transport
            .get_by_name(name)
            .await
            .map_err(|e| translate(e, "Failed to fetch prompt."))
    }

    pub async fn update(&self, name: &str, value: &str) -> Result<(), RepositoryError> {
        debug!(target = "prompt_repository", name, "update prompt");
        self.transport
            .update(name, value)
            .await
            .map_err(|e| translate(e, "Failed to update prompt."))
    }

    pub async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        debug!(target = "prompt_repository", name, "delete prompt");
        self.transport
            .delete(name)
            .await
            .map_err(|e| translate(e, "Failed to delete prompt."))
    }
}

fn translate(source: TransportError, default: &str) -> RepositoryError {
    let message = source
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string());
    warn!(target = "prompt_repository", %message, "prompt store call failed");
    RepositoryError { message, source }
}
