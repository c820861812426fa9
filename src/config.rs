//! Configuration loading and management for daily-digest.
//!
//! Loads settings from `digest.toml` with environment variable overrides for sensitive data.
//! Without a config file the built-in defaults are used.

use crate::style::{Style, Template, TemplateError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "digest.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key: set {0}")]
    MissingApiKey(String),
    #[error("invalid prompt template: {0}")]
    InvalidTemplate(#[from] TemplateError),
    #[error("{0} must be at least 1")]
    InvalidCap(&'static str),
}

/// Feed sources and selection caps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Feed URLs, in the order they are read
    pub urls: Vec<String>,
    /// Entries taken from the top of each feed
    pub per_feed_cap: usize,
    /// Articles kept after ranking
    pub overall_cap: usize,
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier (e.g., "llama-3.3-70b-versatile")
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Named prompt preset
    pub style: Style,
    /// Free-form template; takes precedence over `style`
    pub template: Option<String>,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub groq_key: Option<String>,
}

/// Push notification target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Push server, e.g. "https://ntfy.sh"
    pub host: String,
    pub topic: String,
    /// Sent as the `Title` header and used in the message heading
    pub title: String,
    pub priority: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Reads an environment variable; swapped out in tests
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl Config {
    /// Load configuration from the default location (digest.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Path::new("."), dirs::home_dir().as_deref(), env_var)
    }

    /// Look for the config file under `cwd`, then `home`, falling back to the
    /// built-in defaults when neither has one
    pub fn load_with(
        cwd: &Path,
        home: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        match Self::find_config_file(cwd, home) {
            Some(path) => Self::load_from_with(&path, env),
            None => {
                tracing::info!("no {CONFIG_FILE} found, using built-in defaults");
                let mut config = Config::default();
                config.apply_env(env);
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_from_with(path, env_var)
    }

    fn load_from_with(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.apply_env(env);
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration text, without environment overrides
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Override secrets and the topic from environment variables
    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(key) = env("GROQ_API_KEY") {
            self.api.groq_key = Some(key);
        }
        if let Some(topic) = env("DIGEST_NTFY_TOPIC") {
            self.notify.topic = topic;
        }
    }

    /// Check caps and the prompt template
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feeds.per_feed_cap == 0 {
            return Err(ConfigError::InvalidCap("feeds.per_feed_cap"));
        }
        if self.feeds.overall_cap == 0 {
            return Err(ConfigError::InvalidCap("feeds.overall_cap"));
        }
        self.agent.template()?;
        Ok(())
    }

    /// Find the config file in standard locations
    fn find_config_file(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
        // Check current directory first
        let local_config = cwd.join(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = home?
            .join(".config")
            .join("daily-digest")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }
}

impl ApiConfig {
    /// Get the Groq API key
    pub fn groq_key(&self) -> Result<&str, ConfigError> {
        self.groq_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingApiKey("GROQ_API_KEY".to_string()))
    }
}

impl AgentConfig {
    /// The template in effect: the free-form one if set, otherwise the style preset
    pub fn template(&self) -> Result<Template, TemplateError> {
        match &self.template {
            Some(text) => Template::new(text.as_str()),
            None => Ok(self.style.template()),
        }
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            urls: [
                "https://therundown.ai/rss",
                "https://bensbites.beehiiv.com/feed",
                "https://www.artificialintelligence-newsletter.com/feed",
                "https://blog.practicalai.news/feed",
                "https://huggingface.co/blog/feed.xml",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            per_feed_cap: 5,
            overall_cap: 15,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            style: Style::default(),
            template: None,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            host: "https://ntfy.sh".to_string(),
            topic: "daily-ai-news".to_string(),
            title: "Daily AI News".to_string(),
            priority: "default".to_string(),
        }
    }
}
