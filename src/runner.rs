//! One pass of the pipeline: aggregate, generate, notify.

use crate::aggregator::Aggregator;
use crate::agent::{self, AgentError, GroqClient, TextGenerator};
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, ConfigError};
use crate::feed::{FeedSource, HttpFeedSource};
use crate::http::create_client;
use crate::notify::{Message, NotifyError, NtfyPublisher, Publisher, StdoutPublisher};
use crate::style::Template;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    ClientError(#[from] reqwest::Error),
    #[error(transparent)]
    AgentError(#[from] AgentError),
    #[error(transparent)]
    NotifyError(#[from] NotifyError),
}

/// What a run ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No feed produced any articles; nothing was generated or sent
    NothingToReport,
    /// A digest covering this many articles was published
    Delivered { articles: usize },
}

pub struct Runner {
    config: Config,
    template: Template,
    source: Box<dyn FeedSource>,
    generator: Box<dyn TextGenerator>,
    publisher: Box<dyn Publisher>,
    clock: Box<dyn Clock>,
}

impl Runner {
    pub fn new(
        config: Config,
        source: Box<dyn FeedSource>,
        generator: Box<dyn TextGenerator>,
        publisher: Box<dyn Publisher>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let template = config.agent.template()?;
        Ok(Self {
            config,
            template,
            source,
            generator,
            publisher,
            clock,
        })
    }

    /// Wire up the HTTP-backed collaborators. With `dry_run` the message is
    /// printed instead of pushed.
    pub fn from_config(config: Config, dry_run: bool) -> Result<Self, RunError> {
        let client = create_client()?;
        let source = HttpFeedSource::new(client.clone());
        let generator = GroqClient::from_config(&config, client.clone());
        let publisher: Box<dyn Publisher> = if dry_run {
            Box::new(StdoutPublisher)
        } else {
            Box::new(NtfyPublisher::from_config(&config.notify, client))
        };

        Ok(Self::new(
            config,
            Box::new(source),
            Box::new(generator),
            publisher,
            Box::new(SystemClock),
        )?)
    }

    pub async fn run(&self) -> Result<RunOutcome, RunError> {
        let feeds = &self.config.feeds;
        tracing::info!(feeds = feeds.urls.len(), "collecting articles");

        let aggregator = Aggregator::new(self.source.as_ref(), self.clock.as_ref(), feeds);
        let articles = aggregator.collect(&feeds.urls).await;

        if articles.is_empty() {
            tracing::info!("no articles found, nothing to report");
            return Ok(RunOutcome::NothingToReport);
        }
        let count = articles.len();

        let digest = agent::generate_digest(
            self.generator.as_ref(),
            &self.template,
            &self.config.agent.model,
            articles,
        )
        .await?;

        let message = Message::new(&self.config.notify, self.clock.today(), &digest);
        self.publisher.publish(&message).await?;

        Ok(RunOutcome::Delivered { articles: count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::FeedEntry;
    use crate::clock::FixedClock;
    use crate::feed::{parse_feed, FeedError};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    struct OneFeed(Vec<FeedEntry>);

    #[async_trait]
    impl FeedSource for OneFeed {
        async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, FeedError> {
            match url {
                "https://feed.example/rss" => Ok(self.0.clone()),
                _ => parse_feed(b"offline"),
            }
        }
    }

    #[derive(Clone, Default)]
    struct Calls {
        prompts: Arc<Mutex<Vec<String>>>,
        messages: Arc<Mutex<Vec<Message>>>,
    }

    struct FakeGenerator(Calls);

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn complete(&self, _model: &str, prompt: &str) -> Result<String, AgentError> {
            self.0.prompts.lock().unwrap().push(prompt.to_string());
            Ok("Hello".to_string())
        }
    }

    struct FakePublisher(Calls);

    #[async_trait]
    impl Publisher for FakePublisher {
        async fn publish(&self, message: &Message) -> Result<(), NotifyError> {
            self.0.messages.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.feeds.urls = vec![
            "https://down.example/rss".to_string(),
            "https://feed.example/rss".to_string(),
        ];
        config.agent.template = Some("{articles}".to_string());
        config
    }

    fn runner(entries: Vec<FeedEntry>, calls: &Calls) -> Runner {
        Runner::new(
            config(),
            Box::new(OneFeed(entries)),
            Box::new(FakeGenerator(calls.clone())),
            Box::new(FakePublisher(calls.clone())),
            Box::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn empty_aggregation_calls_nothing() {
        let calls = Calls::default();

        let outcome = runner(Vec::new(), &calls).run().await.unwrap();

        assert_eq!(outcome, RunOutcome::NothingToReport);
        assert!(calls.prompts.lock().unwrap().is_empty());
        assert!(calls.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notification_lists_prompted_articles() {
        let calls = Calls::default();
        let entries = vec![
            FeedEntry {
                title: "Older".into(),
                link: "http://older".into(),
                published: Some("2024-05-01T00:00:00Z".into()),
                summary: Some("o".into()),
            },
            FeedEntry {
                title: "Newer".into(),
                link: "http://newer".into(),
                published: Some("2024-05-02T00:00:00Z".into()),
                summary: None,
            },
        ];

        let outcome = runner(entries, &calls).run().await.unwrap();
        assert_eq!(outcome, RunOutcome::Delivered { articles: 2 });

        let prompts = calls.prompts.lock().unwrap();
        assert_eq!(
            prompts[0],
            "Title: Newer\nLink: http://newer\nSummary: No summary available\n\
             Title: Older\nLink: http://older\nSummary: o"
        );

        let messages = calls.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].title, "Daily AI News");
        assert_eq!(messages[0].priority, "default");
        assert!(messages[0].body.contains("\n\nHello\n\nIndividual Articles:\n"));
        assert!(messages[0]
            .body
            .ends_with("- Newer: http://newer\n- Older: http://older\n"));
    }

    #[test]
    fn invalid_template_is_rejected_at_construction() {
        let mut config = config();
        config.agent.template = Some("no placeholder".to_string());
        let calls = Calls::default();

        let result = Runner::new(
            config,
            Box::new(OneFeed(Vec::new())),
            Box::new(FakeGenerator(calls.clone())),
            Box::new(FakePublisher(calls)),
            Box::new(SystemClock),
        );
        assert!(matches!(result, Err(ConfigError::InvalidTemplate(_))));
    }
}
