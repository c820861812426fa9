//! Article - the normalized form of one feed entry.

/// Summary used when a feed entry carries none.
pub const SUMMARY_FALLBACK: &str = "No summary available";

/// A raw entry as handed back by a feed source, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Publication timestamp, if the feed provides one.
    ///
    /// Not the feed's raw string: the parser reads the date and it is written
    /// back as RFC 3339 UTC to the second, so every feed sorts the same way.
    pub published: Option<String>,
    pub summary: Option<String>,
}

/// One feed item, normalized for the digest.
///
/// `published_at` is either the feed's own timestamp or the collection time,
/// and is compared as a plain string when ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published_at: String,
}

impl Article {
    /// Create a new article
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        summary: impl Into<String>,
        published_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            summary: summary.into(),
            published_at: published_at.into(),
        }
    }

    /// Normalize a feed entry, filling in the fallback summary and `collected_at`
    /// when the feed leaves them out.
    pub fn from_entry(entry: FeedEntry, collected_at: &str) -> Self {
        Self {
            title: entry.title,
            link: entry.link,
            summary: entry
                .summary
                .unwrap_or_else(|| SUMMARY_FALLBACK.to_string()),
            published_at: entry
                .published
                .unwrap_or_else(|| collected_at.to_string()),
        }
    }

    /// The block this article contributes to the prompt
    pub fn prompt_block(&self) -> String {
        format!(
            "Title: {}\nLink: {}\nSummary: {}",
            self.title, self.link, self.summary
        )
    }
}

/// Serialize articles into the text substituted into a style template.
pub fn render_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .map(Article::prompt_block)
        .collect::<Vec<_>>()
        .join("\n")
}
