// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::models::HttpConfig;

/// Create a configured HTTP client with a cookie store for the login session.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(&config.user_agent)
        .cookie_store(true)
        .danger_accept_invalid_certs(!config.verify_ssl);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if !config.verify_ssl {
        log::warn!("TLS certificate verification is disabled");
    }

    Ok(builder.build()?)
}

/// Fetch a page and return its body text.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    log::debug!("GET {}", url);
    let text = client.get(url).send().await?.error_for_status()?.text().await?;
    Ok(text)
}
