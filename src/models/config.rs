//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Server paths, relative to the base URL
    #[serde(default)]
    pub routes: RoutesConfig,

    /// CSS selectors for the scraped jury pages
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Download behavior
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::debug!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.download.chunk_size == 0 {
            return Err(AppError::validation("download.chunk_size must be > 0"));
        }

        let routes = [
            ("routes.login", &self.routes.login),
            ("routes.landing", &self.routes.landing),
            ("routes.submissions_api", &self.routes.submissions_api),
            ("routes.submission_page", &self.routes.submission_page),
        ];
        for (name, value) in routes {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{name} is empty")));
            }
        }

        let selectors = [
            ("selectors.csrf_token", &self.selectors.csrf_token),
            ("selectors.verdict", &self.selectors.verdict),
            ("selectors.source_tab", &self.selectors.source_tab),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{name} is empty")));
            }
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset keeps the transport default
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Verify TLS certificates
    #[serde(default = "defaults::verify_ssl")]
    pub verify_ssl: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            verify_ssl: defaults::verify_ssl(),
        }
    }
}

/// Server paths, joined onto the base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Login form (GET) and login submission (POST)
    #[serde(default = "defaults::login")]
    pub login: String,

    /// Page the server redirects to after a successful jury login
    #[serde(default = "defaults::landing")]
    pub landing: String,

    /// REST endpoint listing all submissions
    #[serde(default = "defaults::submissions_api")]
    pub submissions_api: String,

    /// Prefix of the jury submission pages (`{prefix}/{id}`, `{prefix}/{id}/source`)
    #[serde(default = "defaults::submission_page")]
    pub submission_page: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: defaults::login(),
            landing: defaults::landing(),
            submissions_api: defaults::submissions_api(),
            submission_page: defaults::submission_page(),
        }
    }
}

/// CSS selectors for the jury pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Hidden input holding the login form's CSRF token
    #[serde(default = "defaults::csrf_token")]
    pub csrf_token: String,

    /// Verdict label on the submission detail page
    #[serde(default = "defaults::verdict")]
    pub verdict: String,

    /// One anchor per source file on the source page
    #[serde(default = "defaults::source_tab")]
    pub source_tab: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            csrf_token: defaults::csrf_token(),
            verdict: defaults::verdict(),
            source_tab: defaults::source_tab(),
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Write buffer size in bytes
    #[serde(default = "defaults::chunk_size")]
    pub chunk_size: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::chunk_size(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        concat!("domjudge-fetcher/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn verify_ssl() -> bool {
        true
    }

    // Route defaults
    pub fn login() -> String {
        "login".into()
    }
    pub fn landing() -> String {
        "jury".into()
    }
    pub fn submissions_api() -> String {
        "api/v4/submissions".into()
    }
    pub fn submission_page() -> String {
        "jury/submissions".into()
    }

    // Selector defaults
    pub fn csrf_token() -> String {
        "input[name=_csrf_token]".into()
    }
    pub fn verdict() -> String {
        "div.mb-2>div>span.sol".into()
    }
    pub fn source_tab() -> String {
        "a.nav-link[role=tab]".into()
    }

    // Download defaults
    pub fn chunk_size() -> usize {
        8192
    }
}
