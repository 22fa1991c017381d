use crate::domain::llm_config::LLMConfig;
use std::env;

const DEFAULT_PORT: u16 = 3000;

/// Process-level settings, read once at startup. The API key is the only
/// secret; its absence is not an error here, the completion call fails at
/// first use instead.
#[derive(Debug, Clone)]
pub struct Settings {
    pub llm: LLMConfig,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = LLMConfig::default();

        let llm = LLMConfig {
            base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            api_key: env::var("OPENAI_API_KEY").ok(),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            llm,
            host: "127.0.0.1".to_string(),
            port,
        }
    }
}
