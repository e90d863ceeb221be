// src/services/domjudge.rs

//! DOMjudge session: login, submission listing and jury page access.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Credentials, Submission};
use crate::services::{JudgeSession, PageScraper};
use crate::storage::PartialFile;
use crate::utils::http::{self, fetch_text};
use crate::utils::{endpoint, parse_base_url, same_location};

/// An authenticated session against a DOMjudge server.
pub struct DomjudgeSession {
    client: Client,
    submissions_api: Url,
    submission_page: Url,
    scraper: PageScraper,
}

impl DomjudgeSession {
    /// Log in with a jury account.
    ///
    /// Fetches the login form for its CSRF token, posts the credentials and
    /// accepts the session only if the server lands on the jury page.
    pub async fn login(base_url: &str, config: &Config, credentials: &Credentials) -> Result<Self> {
        let client = http::create_client(&config.http)?;
        let base_url = parse_base_url(base_url)?;
        let scraper = PageScraper::new(&config.selectors)?;

        let login_url = endpoint(&base_url, &config.routes.login)?;
        let login_page = fetch_text(&client, login_url.as_str()).await?;
        let csrf_token = scraper.csrf_token(&login_page)?;
        log::info!("Logging in as {} - csrf token is {}", credentials.username, csrf_token);

        let response = client
            .post(login_url)
            .form(&[
                ("_username", credentials.username.as_str()),
                ("_password", credentials.password.as_str()),
                ("_csrf_token", csrf_token.as_str()),
            ])
            .send()
            .await?;

        let landing = endpoint(&base_url, &config.routes.landing)?;
        check_login(response.status(), response.url(), &landing)?;
        log::info!("Logged in successfully");

        Ok(Self {
            client,
            submissions_api: endpoint(&base_url, &config.routes.submissions_api)?,
            submission_page: endpoint(&base_url, &config.routes.submission_page)?,
            scraper,
        })
    }

    /// URL of a jury submission page, optionally with a trailing segment.
    fn submission_url(&self, submission_id: &str, tail: Option<&str>) -> Result<Url> {
        let mut url = self.submission_page.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::config("server URL cannot hold a path"))?;
            segments.pop_if_empty().push(submission_id);
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }
}

/// Accept a login response only when it is a 200 that landed on `landing`.
pub fn check_login(status: StatusCode, final_url: &Url, landing: &Url) -> Result<()> {
    if status != StatusCode::OK || !same_location(final_url, landing) {
        return Err(AppError::auth(format!(
            "status code is {}, landed at {}",
            status.as_u16(),
            final_url
        )));
    }
    Ok(())
}

#[async_trait]
impl JudgeSession for DomjudgeSession {
    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        log::info!("Getting list of submissions from {}", self.submissions_api);
        let response = self.client.get(self.submissions_api.clone()).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_verdict(&self, submission_id: &str) -> Result<String> {
        let url = self.submission_url(submission_id, None)?;
        let html = fetch_text(&self.client, url.as_str()).await?;
        self.scraper.verdict(&html).map_err(|e| match e {
            AppError::Parse { message, .. } => {
                AppError::parse(format!("submission {submission_id}"), message)
            }
            other => other,
        })
    }

    async fn list_source_files(&self, submission_id: &str) -> Result<Vec<String>> {
        let url = self.submission_url(submission_id, Some("source"))?;
        let html = fetch_text(&self.client, url.as_str()).await?;
        self.scraper.source_files(&html).map_err(|e| match e {
            AppError::Parse { message, .. } => {
                AppError::parse(format!("sources of submission {submission_id}"), message)
            }
            other => other,
        })
    }

    async fn download_file(
        &self,
        submission_id: &str,
        file_index: usize,
        sink: &mut PartialFile,
    ) -> Result<()> {
        let mut url = self.submission_url(submission_id, Some("source"))?;
        url.query_pairs_mut()
            .append_pair("fetch", &file_index.to_string());

        log::debug!("GET {}", url);
        let mut response = self.client.get(url).send().await?.error_for_status()?;
        while let Some(chunk) = response.chunk().await? {
            sink.write_chunk(&chunk).await?;
        }
        Ok(())
    }
}
