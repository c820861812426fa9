//! # Daily Digest
//!
//! Pulls the latest items from a list of RSS/Atom feeds, has an LLM write them
//! up as a stylized digest, and pushes the result to an ntfy topic.
//!
//! ## Features
//!
//! - **Recency ranking**: top entries per feed, merged and sorted newest first
//! - **Swappable styles**: named prompt presets or a free-form template
//! - **Single shot**: one run per invocation, scheduling is left to cron or CI

pub mod agent;
pub mod aggregator;
pub mod article;
pub mod clock;
pub mod config;
pub mod digest;
pub mod feed;
pub mod http;
pub mod notify;
pub mod runner;
pub mod style;

pub use article::Article;
pub use config::Config;
pub use digest::Digest;
pub use runner::{RunOutcome, Runner};
pub use style::{Style, Template};
