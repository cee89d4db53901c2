use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default model; a single id, no automatic fallback across models.
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

#[derive(Debug, Clone, Deserialize)]
pub struct CompanionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    /// When false the service runs against the mock provider (tests,
    /// offline development).
    pub enabled: bool,
}

/// Fixed model configuration, constructed once at startup and reused for
/// every request.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: i32,
}

impl CompanionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CompanionConfig {
            common,
            google: GoogleConfig {
                // No default: a missing key is a fatal startup error.
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
                enabled: get_env("COMPANION_GENAI_ENABLED", Some("true"), is_prod)?
                    .parse()
                    .unwrap_or(true),
            },
            model: ModelConfig {
                name: get_env("COMPANION_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
                temperature: get_env("COMPANION_TEMPERATURE", Some("0.6"), is_prod)?
                    .parse()
                    .unwrap_or(0.6),
                top_p: get_env("COMPANION_TOP_P", Some("0.9"), is_prod)?
                    .parse()
                    .unwrap_or(0.9),
                top_k: get_env("COMPANION_TOP_K", Some("40"), is_prod)?
                    .parse()
                    .unwrap_or(40),
                max_output_tokens: get_env("COMPANION_MAX_OUTPUT_TOKENS", Some("512"), is_prod)?
                    .parse()
                    .unwrap_or(512),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
