//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;

/// Parse a server base URL, making sure relative paths join beneath it.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Join a server-relative path onto the base URL.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Compare two URLs ignoring a trailing slash on the path.
pub fn same_location(a: &Url, b: &Url) -> bool {
    let strip = |u: &Url| {
        let mut u = u.clone();
        let path = u.path().trim_end_matches('/').to_string();
        u.set_path(&path);
        u
    };
    strip(a) == strip(b)
}
