//! Jury page scraping.
//!
//! The verdict and the source file listing are only available as server-rendered
//! HTML. Everything that depends on that markup lives here.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::SelectorConfig;

/// Verdict used when the verdict label exists but is still empty.
pub const PENDING_VERDICT: &str = "pending";

/// Extracts the scraped fields from jury pages.
#[derive(Debug, Clone)]
pub struct PageScraper {
    csrf_token: Selector,
    verdict: Selector,
    source_tab: Selector,
}

impl PageScraper {
    /// Parse the configured selectors once.
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            csrf_token: parse_selector(&config.csrf_token)?,
            verdict: parse_selector(&config.verdict)?,
            source_tab: parse_selector(&config.source_tab)?,
        })
    }

    /// Value of the hidden CSRF input on the login form.
    pub fn csrf_token(&self, html: &str) -> Result<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.csrf_token)
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(str::to_string)
            .ok_or_else(|| AppError::parse("login page", "CSRF token input not found"))
    }

    /// Verdict label from a submission detail page.
    pub fn verdict(&self, html: &str) -> Result<String> {
        let document = Html::parse_document(html);
        let node = document
            .select(&self.verdict)
            .next()
            .ok_or_else(|| AppError::parse("submission page", "verdict label not found"))?;

        let text = node.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            Ok(PENDING_VERDICT.to_string())
        } else {
            Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
        }
    }

    /// File names from a submission source page, in tab order.
    pub fn source_files(&self, html: &str) -> Result<Vec<String>> {
        let document = Html::parse_document(html);
        let files: Vec<String> = document
            .select(&self.source_tab)
            .map(|tab| tab.text().collect::<String>().trim().to_string())
            .collect();

        if files.is_empty() {
            return Err(AppError::parse("source page", "no source file tabs found"));
        }
        Ok(files)
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_scraper() -> PageScraper {
        PageScraper::new(&SelectorConfig::default()).unwrap()
    }

    const LOGIN_PAGE: &str = r#"
        <html><body>
          <form method="post" action="/domjudge/login">
            <input type="hidden" name="_csrf_token" value="abc123.def">
            <input type="text" name="_username">
            <input type="password" name="_password">
          </form>
        </body></html>"#;

    const SUBMISSION_PAGE: &str = r#"
        <html><body>
          <div class="mb-2">
            <div>
              Result: <span class="sol sol_incorrect">wrong-answer</span>
            </div>
          </div>
        </body></html>"#;

    const SOURCE_PAGE: &str = r##"
        <html><body>
          <ul class="nav nav-tabs" role="tablist">
            <li class="nav-item"><a class="nav-link active" role="tab" href="#source0">main.cpp</a></li>
            <li class="nav-item"><a class="nav-link" role="tab" href="#source1"> util.h </a></li>
            <li class="nav-item"><a class="nav-link" href="#diff">diff</a></li>
          </ul>
        </body></html>"##;

    #[test]
    fn test_csrf_token() {
        let scraper = default_scraper();
        assert_eq!(scraper.csrf_token(LOGIN_PAGE).unwrap(), "abc123.def");
    }

    #[test]
    fn test_csrf_token_missing() {
        let scraper = default_scraper();
        let err = scraper.csrf_token("<html><form></form></html>").unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }

    #[test]
    fn test_verdict() {
        let scraper = default_scraper();
        assert_eq!(scraper.verdict(SUBMISSION_PAGE).unwrap(), "wrong-answer");
    }

    #[test]
    fn test_verdict_missing_node() {
        let scraper = default_scraper();
        let err = scraper
            .verdict("<html><div class=\"mb-2\"><div></div></div></html>")
            .unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }

    #[test]
    fn test_verdict_empty_is_pending() {
        let scraper = default_scraper();
        let html = r#"<div class="mb-2"><div><span class="sol"> </span></div></div>"#;
        assert_eq!(scraper.verdict(html).unwrap(), PENDING_VERDICT);
    }

    #[test]
    fn test_source_files_in_order() {
        let scraper = default_scraper();
        assert_eq!(
            scraper.source_files(SOURCE_PAGE).unwrap(),
            vec!["main.cpp".to_string(), "util.h".to_string()]
        );
    }

    #[test]
    fn test_source_files_missing() {
        let scraper = default_scraper();
        assert!(scraper.source_files("<html></html>").is_err());
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let config = SelectorConfig {
            verdict: "[[invalid".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            PageScraper::new(&config),
            Err(AppError::Selector { .. })
        ));
    }
}
