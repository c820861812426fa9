//! LLM agent module for digest generation.
//!
//! Talks to an OpenAI-compatible chat completions API (Groq by default).

pub use crate::digest::Digest;

use crate::article::{render_articles, Article};
use crate::config::{ApiConfig, Config, ConfigError};
use crate::style::Template;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("LLM response contained no choices")]
    EmptyResponse,
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// A text-generation backend taking a single user prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, AgentError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Groq chat completions client.
///
/// The API key is only checked when a request is made, so a run with nothing
/// to report never needs one.
pub struct GroqClient {
    client: Client,
    base_url: String,
    api: ApiConfig,
}

impl GroqClient {
    pub fn new(client: Client, base_url: impl Into<String>, api: ApiConfig) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new(
            client,
            config.agent.base_url.as_str(),
            config.api.clone(),
        )
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, AgentError> {
        let api_key = self.api.groq_key()?;

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response: ChatResponse = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(AgentError::EmptyResponse)?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

/// Build the prompt for `articles` from `template`
pub fn build_prompt(template: &Template, articles: &[Article]) -> String {
    template.render(&render_articles(articles))
}

/// Run the digest agent on the provided articles
pub async fn generate_digest(
    generator: &dyn TextGenerator,
    template: &Template,
    model: &str,
    articles: Vec<Article>,
) -> Result<Digest, AgentError> {
    let prompt = build_prompt(template, &articles);
    tracing::info!(model, articles = articles.len(), "requesting digest");

    let text = generator.complete(model, &prompt).await?;
    tracing::debug!(chars = text.len(), "digest received");

    Ok(Digest::new(text, articles))
}
