use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

pub const REQUEST_TIMEOUT_SECS: u64 = 5;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared client with the default live-feed timeout.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| build_client(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}
