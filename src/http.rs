//! Shared HTTP client setup.

use reqwest::Client;
use std::time::Duration;

/// User-Agent string sent with every request
const USER_AGENT: &str = concat!(
    "daily-digest/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/cladam/daily-digest)"
);

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the HTTP client used for feeds, the LLM and push delivery
pub fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}
