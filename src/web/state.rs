use crate::config::AppConfig;
use crate::llm::LlmManager;
use crate::sql::{KeywordGuard, SqlGenerator};
use tracing::{info, warn};

/// Shared application state for the web server
pub struct AppState {
    pub config: AppConfig,
    pub generator: SqlGenerator,
}

impl AppState {
    pub fn new(config: AppConfig, llm_manager: Option<LlmManager>) -> Self {
        match &llm_manager {
            Some(manager) => info!("Groq client initialized with model {}", manager.model()),
            None => warn!(
                "GROQ_API_KEY not set. Get your free API key from: {}",
                crate::sql::GROQ_CONSOLE_URL
            ),
        }

        let guard = KeywordGuard::with_builtins(&config.guard.forbidden_keywords);

        Self {
            config,
            generator: SqlGenerator::new(llm_manager, guard),
        }
    }

    pub fn groq_configured(&self) -> bool {
        self.generator.is_configured()
    }
}
