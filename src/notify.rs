//! Push notification delivery (ntfy).

use crate::config::NotifyConfig;
use crate::digest::Digest;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to send notification: {0}")]
    SendFailed(#[from] reqwest::Error),
}

/// A notification ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub priority: String,
    pub body: String,
}

impl Message {
    /// Build the notification for `digest`, dated `date`
    pub fn new(config: &NotifyConfig, date: NaiveDate, digest: &Digest) -> Self {
        Self {
            title: config.title.clone(),
            priority: config.priority.clone(),
            body: render_message(&config.title, date, digest),
        }
    }
}

/// Render the message body: heading, digest text, then one line per article.
pub fn render_message(title: &str, date: NaiveDate, digest: &Digest) -> String {
    let mut message = format!(
        "{} - {}\n\n{}\n\nIndividual Articles:\n",
        title,
        date.format("%Y-%m-%d"),
        digest.text
    );
    for article in &digest.articles {
        message.push_str(&format!("- {}: {}\n", article.title, article.link));
    }
    message
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, message: &Message) -> Result<(), NotifyError>;
}

/// Posts messages to an ntfy topic
pub struct NtfyPublisher {
    client: Client,
    url: String,
}

impl NtfyPublisher {
    pub fn new(client: Client, host: &str, topic: &str) -> Self {
        Self {
            client,
            url: format!("{}/{}", host.trim_end_matches('/'), topic),
        }
    }

    pub fn from_config(config: &NotifyConfig, client: Client) -> Self {
        Self::new(client, &config.host, &config.topic)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Publisher for NtfyPublisher {
    async fn publish(&self, message: &Message) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .header("Title", &message.title)
            .header("Priority", &message.priority)
            .body(message.body.clone())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(url = %self.url, %status, "notification sent");
        } else {
            tracing::warn!(url = %self.url, %status, "push endpoint rejected notification");
        }
        Ok(())
    }
}

/// Prints messages to stdout instead of delivering them
#[derive(Debug, Default)]
pub struct StdoutPublisher;

#[async_trait]
impl Publisher for StdoutPublisher {
    async fn publish(&self, message: &Message) -> Result<(), NotifyError> {
        println!("=== {} (priority: {}) ===\n", message.title, message.priority);
        print!("{}", message.body);
        Ok(())
    }
}
