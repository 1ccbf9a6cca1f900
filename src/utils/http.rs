use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

pub fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.max(1)))
        .user_agent(concat!("x-post-generator/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}
