use tracing::info;

/// API endpoint configuration, injected into the transport constructors at
/// startup. When `base_url` is unset the derived URLs stay relative, for
/// deployments where the backend is served from the same origin.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl ApiConfig {
    /// Resolve configuration from the environment once at startup.
    pub fn from_env() -> Self {
        let cfg = Self {
            base_url: std::env::var("EVALUATOR_API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30_000),
        };
        info!(
            target = "config",
            base_url = %cfg.base_url.as_deref().unwrap_or("<relative>"),
            "resolved API configuration"
        );
        cfg
    }

    /// Endpoint for evaluation submissions.
    pub fn evaluate_url(&self) -> String {
        self.join("/api/evaluate")
    }

    /// Base endpoint for the prompt store.
    pub fn prompts_url(&self) -> String {
        self.join("/api/prompts")
    }

    fn join(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
            None => path.to_string(),
        }
    }
}
