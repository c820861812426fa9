//! Feed fetching and parsing.
//!
//! Uses reqwest for fetching and feed-rs for RSS/Atom parsing.

use crate::article::FeedEntry;
use async_trait::async_trait;
use chrono::SecondsFormat;
use feed_rs::parser::ParseFeedError;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to fetch feed: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("failed to parse feed: {0}")]
    ParseError(#[from] ParseFeedError),
}

/// Anything that can turn a feed URL into its entries, in feed order.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, FeedError>;
}

/// Fetches feeds over HTTP
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        parse_feed(&body)
    }
}

/// Parse an RSS or Atom document into entries, keeping the feed's order
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let feed = feed_rs::parser::parse(body)?;

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link: entry
                .links
                .into_iter()
                .next()
                .map(|l| l.href)
                .unwrap_or_default(),
            published: entry
                .published
                .map(|p| p.to_rfc3339_opts(SecondsFormat::Secs, true)),
            summary: entry.summary.map(|s| s.content),
        })
        .collect();

    Ok(entries)
}
