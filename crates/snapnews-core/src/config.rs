use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tags::{default_taxonomy, TagCategory};

/// Environment variable holding the news search API key
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";
/// Environment variable holding the LLM API key
pub const LLM_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Tag taxonomy shown in the tag panel, in display order
    #[serde(default = "default_taxonomy")]
    pub tags: Vec<TagCategory>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            news: NewsConfig::default(),
            ai: AiConfig::default(),
            ui: UiConfig::default(),
            tags: default_taxonomy(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level, used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// News search API key (overridden by NEWS_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the news search API
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    /// Language filter for search results
    #[serde(default = "default_language")]
    pub language: String,
    /// Sort order for search results
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Number of articles requested per fetch
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_news_base_url(),
            language: default_language(),
            sort_by: default_sort_by(),
            page_size: default_page_size(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// LLM API key (overridden by OPENAI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Max output tokens for one summary
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Number of articles fed into the summary prompt (never above 8)
    #[serde(default = "default_summary_article_limit")]
    pub summary_article_limit: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            summary_article_limit: default_summary_article_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Number of news cards rendered, at most 8
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            display_limit: default_display_limit(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snapnews")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_language() -> String {
    "zh".to_string()
}

fn default_sort_by() -> String {
    "publishedAt".to_string()
}

fn default_page_size() -> usize {
    40
}

fn default_timeout() -> u64 {
    30
}

fn default_api_base() -> String {
    "https://yunwu.ai/v1".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-20240620".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_summary_article_limit() -> usize {
    8
}

fn default_tick_rate() -> u64 {
    100
}

fn default_display_limit() -> usize {
    8
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// Read a non-blank environment variable
fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Load configuration from file (or defaults), then apply environment overrides
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Override credentials with NEWS_API_KEY / OPENAI_API_KEY when set
    pub fn apply_env(&mut self) {
        self.apply_env_with(env_value);
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(NEWS_API_KEY_ENV) {
            self.news.api_key = Some(key);
        }
        if let Some(key) = lookup(LLM_API_KEY_ENV) {
            self.ai.api_key = Some(key);
        }
    }

    /// Fail unless both API credentials are present
    pub fn require_credentials(&self) -> crate::Result<()> {
        if self.news_api_key().is_none() {
            return Err(crate::Error::Config(format!(
                "News API key not configured (set {} or [news] api_key)",
                NEWS_API_KEY_ENV
            )));
        }
        if self.llm_api_key().is_none() {
            return Err(crate::Error::Config(format!(
                "LLM API key not configured (set {} or [ai] api_key)",
                LLM_API_KEY_ENV
            )));
        }
        Ok(())
    }

    pub fn news_api_key(&self) -> Option<&str> {
        self.news.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn llm_api_key(&self) -> Option<&str> {
        self.ai.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/snapnews/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("snapnews")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("snapnews.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
