//! Digest styles: named prompt presets and free-form templates.
//!
//! Every template has exactly one `{articles}` placeholder, which receives the
//! serialized article block.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder replaced by the serialized articles
pub const PLACEHOLDER: &str = "{articles}";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template must contain exactly one {{articles}} placeholder, found {0}")]
    PlaceholderCount(usize),
}

const GEN_Z: &str = r#"
Turn these latest AI articles into a fire daily digest that's concise (400-600 words max), highly engaging, and amusing without diluting the real value or facts.

Style guidelines:
- Intelligent Gen Z American voice.
- Prioritize the most interesting/important breakthroughs, tools, impacts, and wild news. Cut fluff, focus on what's actually novel or actionable.
- Structure: Start with a catchy hook, then bullet-point key stories with short, punchy overviews + clever commentary.
- Make it fun and addictive to read (like scrolling TikTok but for AI news), but still super useful. Highlight why it matters or how to use it.
- End with a numbered list of individual article links (title + link only, no extra text).

Articles to summarize: {articles}
"#;

const DRY_HUMOR: &str = r#"
Turn these latest AI articles into a daily digest that's concise (400-600 words max) and written with bone-dry, understated humor, without diluting the real value or facts.

Style guidelines:
- Deadpan British broadsheet voice. Never use exclamation marks.
- Prioritize the most important breakthroughs, tools and impacts. Skip hype, note it quietly where it exists.
- Structure: Open with a single wry sentence, then bullet-point key stories with a plain overview and one understated aside each.
- Keep it informative first. The jokes should be easy to miss.
- End with a numbered list of individual article links (title + link only, no extra text).

Articles to summarize: {articles}
"#;

const COMEDIC: &str = r#"
Turn these latest AI articles into a daily digest that's concise (400-600 words max) and genuinely funny, without diluting the real value or facts.

Style guidelines:
- Stand-up comedian voice doing a tight five on the day's AI news.
- Prioritize the most interesting breakthroughs, tools, impacts and absurd news.
- Structure: Open with a joke, then bullet-point key stories, each with a short factual overview followed by a punchline.
- Every story must still tell the reader what happened and why it matters.
- End with a numbered list of individual article links (title + link only, no extra text).

Articles to summarize: {articles}
"#;

/// Named prompt presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Punchy Gen Z digest
    #[default]
    GenZ,
    /// Deadpan, understated digest
    DryHumor,
    /// Stand-up comedy digest
    Comedic,
}

impl Style {
    pub fn template(self) -> Template {
        let text = match self {
            Style::GenZ => GEN_Z,
            Style::DryHumor => DRY_HUMOR,
            Style::Comedic => COMEDIC,
        };
        Template(text.to_string())
    }
}

/// A validated prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        match text.matches(PLACEHOLDER).count() {
            1 => Ok(Self(text)),
            n => Err(TemplateError::PlaceholderCount(n)),
        }
    }

    /// Substitute the serialized articles into the placeholder
    pub fn render(&self, articles: &str) -> String {
        self.0.replacen(PLACEHOLDER, articles, 1)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
