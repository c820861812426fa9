//! Digest struct - the generated text together with the articles it covers.

use crate::article::Article;

/// Output of the LLM for one run.
///
/// Carries the articles that went into the prompt so the notification lists
/// exactly those, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// Generated prose, verbatim from the model
    pub text: String,
    pub articles: Vec<Article>,
}

impl Digest {
    /// Create a new digest
    pub fn new(text: String, articles: Vec<Article>) -> Self {
        Self { text, articles }
    }
}
