use clap::Parser;
use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::sql::guard::BUILTIN_FORBIDDEN_KEYWORDS;
use std::path::{Path, PathBuf};

/// Environment variable holding the Groq API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_url: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

/// Extra denylist entries; the built-in keywords always apply.
#[derive(Debug, Deserialize, Clone)]
pub struct GuardConfig {
    pub forbidden_keywords: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub web: WebConfig,
    pub llm: LlmConfig,
    pub guard: GuardConfig,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl AppConfig {
    pub fn new(args: &CliArgs) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut config_builder = Config::builder()
            .set_default("web.host", defaults.web.host)?
            .set_default("web.port", defaults.web.port as i64)?
            .set_default("web.allowed_origins", defaults.web.allowed_origins)?
            .set_default("llm.model", defaults.llm.model)?
            .set_default("llm.api_url", defaults.llm.api_url)?
            .set_default("llm.temperature", defaults.llm.temperature as f64)?
            .set_default("llm.max_tokens", defaults.llm.max_tokens as i64)?
            .set_default("llm.timeout_secs", defaults.llm.timeout_secs as i64)?
            .set_default("guard.forbidden_keywords", defaults.guard.forbidden_keywords)?;

        if let Some(config_path) = &args.config {
            config_builder = config_builder.add_source(File::from(config_path.as_path()));
        } else {
            let default_locations = vec![
                "config.toml",
                "config/config.toml",
                "/etc/nl-sql/config.toml",
            ];

            for location in default_locations {
                if Path::new(location).exists() {
                    config_builder =
                        config_builder.add_source(File::new(location, config::FileFormat::Toml));
                    break;
                }
            }
        }

        let mut config: AppConfig = config_builder.build()?.try_deserialize()?;

        if let Some(host) = &args.host {
            config.web.host = host.clone();
        }
        if let Some(port) = args.port {
            config.web.port = port;
        }

        config.llm.api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok(), config.llm.api_key);

        Ok(config)
    }
}

/// Picks the key from the environment first, then the configured fallback.
/// Blank values count as unset.
pub fn resolve_api_key(from_env: Option<String>, configured: Option<String>) -> Option<String> {
    from_env
        .into_iter()
        .chain(configured)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                allowed_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:4000".to_string(),
                ],
            },
            llm: LlmConfig {
                model: "llama-3.3-70b-versatile".to_string(),
                api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                api_key: None,
                temperature: 0.1,
                max_tokens: 500,
                timeout_secs: 60,
            },
            guard: GuardConfig {
                forbidden_keywords: BUILTIN_FORBIDDEN_KEYWORDS
                    .iter()
                    .map(|k| k.to_string())
                    .collect(),
            },
        }
    }
}
