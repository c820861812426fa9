//! Collects articles across feeds and keeps the newest ones.

use crate::article::Article;
use crate::clock::Clock;
use crate::config::FeedsConfig;
use crate::feed::FeedSource;

/// Reads the configured feeds one after another and ranks the result.
pub struct Aggregator<'a> {
    source: &'a dyn FeedSource,
    clock: &'a dyn Clock,
    per_feed_cap: usize,
    overall_cap: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(source: &'a dyn FeedSource, clock: &'a dyn Clock, feeds: &FeedsConfig) -> Self {
        Self {
            source,
            clock,
            per_feed_cap: feeds.per_feed_cap,
            overall_cap: feeds.overall_cap,
        }
    }

    /// Fetch every feed in order and return at most `overall_cap` articles, newest first.
    ///
    /// A feed that cannot be fetched or parsed contributes nothing.
    pub async fn collect(&self, urls: &[String]) -> Vec<Article> {
        let mut articles = Vec::new();

        for url in urls {
            let entries = match self.source.fetch(url).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "skipping feed");
                    continue;
                }
            };
            tracing::debug!(%url, entries = entries.len(), "fetched feed");

            articles.extend(
                entries
                    .into_iter()
                    .take(self.per_feed_cap)
                    .map(|entry| Article::from_entry(entry, &self.clock.timestamp())),
            );
        }

        rank(articles, self.overall_cap)
    }
}

/// Sort newest first by `published_at` and keep the first `overall_cap`.
///
/// The sort is stable, so equal timestamps keep feed order.
pub fn rank(mut articles: Vec<Article>, overall_cap: usize) -> Vec<Article> {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles.truncate(overall_cap);
    articles
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
    use std::collections::HashMap;

    /// Serves canned entries per URL; unknown URLs fail like an unreachable host.
    struct StaticSource(HashMap<String, Vec<FeedEntry>>);

    #[async_trait]
    impl FeedSource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, FeedError> {
            match self.0.get(url) {
                Some(entries) => Ok(entries.clone()),
                None => parse_feed(b"unreachable"),
            }
        }
    }

    fn entry(title: &str, published: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: format!("https://example.com/{title}"),
            published: published.map(String::from),
            summary: None,
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn feeds(per_feed_cap: usize, overall_cap: usize) -> FeedsConfig {
        FeedsConfig {
            urls: Vec::new(),
            per_feed_cap,
            overall_cap,
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[tokio::test]
    async fn newest_first_across_feeds() {
        let source = StaticSource(HashMap::from([
            (
                "a".to_string(),
                vec![
                    entry("a1", Some("2024-01-02")),
                    entry("a2", Some("2024-01-01")),
                ],
            ),
            ("b".to_string(), vec![entry("b1", Some("2024-01-03"))]),
        ]));
        let clock = clock();
        let aggregator = Aggregator::new(&source, &clock, &feeds(5, 15));

        let articles = aggregator.collect(&["a".to_string(), "b".to_string()]).await;

        assert_eq!(titles(&articles), vec!["b1", "a1", "a2"]);
    }

    #[tokio::test]
    async fn ties_keep_source_order() {
        let source = StaticSource(HashMap::from([
            (
                "a".to_string(),
                vec![entry("a1", Some("2024-01-01")), entry("a2", Some("2024-01-01"))],
            ),
            ("b".to_string(), vec![entry("b1", Some("2024-01-01"))]),
        ]));
        let clock = clock();
        let aggregator = Aggregator::new(&source, &clock, &feeds(5, 15));

        let articles = aggregator.collect(&["b".to_string(), "a".to_string()]).await;

        assert_eq!(titles(&articles), vec!["b1", "a1", "a2"]);
    }

    #[tokio::test]
    async fn caps_per_feed_and_overall() {
        let big: Vec<FeedEntry> = (0..10)
            .map(|i| entry(&format!("x{i}"), Some(&format!("2024-01-{:02}", 20 - i))))
            .collect();
        let source = StaticSource(HashMap::from([
            ("x".to_string(), big.clone()),
            ("y".to_string(), big.clone()),
            ("z".to_string(), big.clone()),
            ("w".to_string(), big),
        ]));
        let clock = clock();
        let aggregator = Aggregator::new(&source, &clock, &feeds(5, 15));

        let urls: Vec<String> = ["x", "y", "z", "w"].map(String::from).to_vec();
        let articles = aggregator.collect(&urls).await;

        assert_eq!(articles.len(), 15);
        // Only the first five of each feed are eligible
        assert!(articles.iter().all(|a| {
            let n: usize = a.title[1..].parse().unwrap();
            n < 5
        }));
    }

    #[tokio::test]
    async fn failing_feed_is_skipped() {
        let source = StaticSource(HashMap::from([(
            "ok".to_string(),
            vec![entry("ok1", Some("2024-01-01"))],
        )]));
        let clock = clock();
        let aggregator = Aggregator::new(&source, &clock, &feeds(5, 15));

        let articles = aggregator
            .collect(&["down".to_string(), "ok".to_string()])
            .await;

        assert_eq!(titles(&articles), vec!["ok1"]);
    }

    #[tokio::test]
    async fn all_feeds_failing_gives_nothing() {
        let source = StaticSource(HashMap::new());
        let clock = clock();
        let aggregator = Aggregator::new(&source, &clock, &feeds(5, 15));

        assert!(aggregator.collect(&["a".to_string(), "b".to_string()]).await.is_empty());
    }

    #[tokio::test]
    async fn undated_entries_use_clock() {
        let source = StaticSource(HashMap::from([(
            "a".to_string(),
            vec![entry("dated", Some("2023-12-31T00:00:00Z")), entry("undated", None)],
        )]));
        let clock = clock();
        let aggregator = Aggregator::new(&source, &clock, &feeds(5, 15));

        let articles = aggregator.collect(&["a".to_string()]).await;

        assert_eq!(titles(&articles), vec!["undated", "dated"]);
        assert_eq!(articles[0].published_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn rank_truncates() {
        let articles = (0..4)
            .map(|i| Article::new(format!("t{i}"), "", "", format!("2024-01-0{i}")))
            .collect();
        let ranked = rank(articles, 2);

        assert_eq!(titles(&ranked), vec!["t3", "t2"]);
    }
}
