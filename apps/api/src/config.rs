use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,\
    https://your-vercel-app.vercel.app,\
    https://hg-resume-craft.vercel.app,\
    https://ehmt8mro7sonvp9cs5oblz.streamlit.app";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub chatbot: ChatbotSettings,
}

/// Tunables for the smart chatbot.
#[derive(Debug, Clone)]
pub struct ChatbotSettings {
    pub max_search_results: usize,
    /// Exchanges kept per session before the oldest are dropped.
    pub max_session_memory: usize,
    pub web_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ChatbotSettings {
    fn default() -> Self {
        Self {
            max_search_results: 3,
            max_session_memory: 50,
            web_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ChatbotSettings::default();

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            llm_base_url: env_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 8000)?,
            rust_log: env_or("RUST_LOG", "info"),
            cors_allowed_origins: parse_origins(&env_or(
                "CORS_ALLOWED_ORIGINS",
                DEFAULT_CORS_ORIGINS,
            )),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            chatbot: ChatbotSettings {
                max_search_results: parse_env(
                    "CHATBOT_MAX_SEARCH_RESULTS",
                    defaults.max_search_results,
                )?,
                max_session_memory: parse_env(
                    "CHATBOT_MAX_SESSION_MEMORY",
                    defaults.max_session_memory,
                )?,
                web_timeout_secs: parse_env("CHATBOT_WEB_TIMEOUT_SECS", defaults.web_timeout_secs)?,
                user_agent: defaults.user_agent,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma separated origin list. Browsers send origins without a
/// trailing slash, so one is stripped if present.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
