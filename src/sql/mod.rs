pub mod cleanup;
pub mod guard;
pub mod prompt;

use crate::llm::{LlmError, LlmManager};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use cleanup::strip_code_fence;
pub use guard::KeywordGuard;
pub use prompt::build_prompt;

pub const GROQ_CONSOLE_URL: &str = "https://console.groq.com/";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Groq is not configured. Set GROQ_API_KEY environment variable. Get it from: {}", GROQ_CONSOLE_URL)]
    NotConfigured,
    #[error("Groq could not generate SQL from your question")]
    EmptyGeneration,
    #[error("Generated SQL contains forbidden operations. Only SELECT queries are allowed.")]
    ForbiddenOperation { keyword: String },
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Turns questions into guarded, read-only SQL.
pub struct SqlGenerator {
    llm: Option<LlmManager>,
    guard: KeywordGuard,
}

impl SqlGenerator {
    pub fn new(llm: Option<LlmManager>, guard: KeywordGuard) -> Self {
        Self { llm, guard }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn generate(&self, question: &str) -> Result<String, GenerateError> {
        let llm = self.llm.as_ref().ok_or(GenerateError::NotConfigured)?;

        debug!("Generating SQL for question: {}", question);
        let prompt = build_prompt(question);
        let completion = llm.complete(&prompt).await?;

        let sql = strip_code_fence(&completion);
        if sql.is_empty() {
            warn!("Completion was empty after cleanup");
            return Err(GenerateError::EmptyGeneration);
        }

        if let Some(keyword) = self.guard.find_forbidden(&sql) {
            warn!("Rejected generated SQL containing forbidden keyword '{}'", keyword);
            return Err(GenerateError::ForbiddenOperation {
                keyword: keyword.to_string(),
            });
        }

        info!("Generated SQL: {}", sql);
        Ok(sql)
    }
}
