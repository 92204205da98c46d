use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use nl_sql::config::{AppConfig, CliArgs};
use nl_sql::llm::LlmManager;
use nl_sql::util::logging::init_tracing;
use nl_sql::web;
use nl_sql::web::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A local .env may carry GROQ_API_KEY
    let dotenv = dotenvy::dotenv();

    let args = CliArgs::parse();
    init_tracing(args.log_json);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = match AppConfig::new(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let llm_manager = match LlmManager::from_config(&config.llm) {
        Ok(manager) => manager,
        Err(e) => {
            error!("Failed to initialize Groq client: {}", e);
            return Err(e.into());
        }
    };

    let app_state = Arc::new(AppState::new(config.clone(), llm_manager));

    info!("Starting Groq SQL Generator on {}:{}", config.web.host, config.web.port);
    match web::run_server(config.web, app_state).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            error!("Server error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
