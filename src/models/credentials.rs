//! Jury account credentials.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Username and password read from a JSON file.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Load credentials from a JSON file of the form `{"username": .., "password": ..}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!(
                "Cannot read credentials file {}: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::config(format!(
                "Invalid credentials file {}: {e}",
                path.display()
            ))
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_credentials() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("credentials.json");
        fs::write(&path, r#"{"username": "judge", "password": "s3cret"}"#).unwrap();

        let creds = Credentials::load(&path).unwrap();
        assert_eq!(creds.username, "judge");
        assert_eq!(creds.password, "s3cret");
    }

    #[test]
    fn test_missing_field_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("credentials.json");
        fs::write(&path, r#"{"username": "judge"}"#).unwrap();

        assert!(matches!(Credentials::load(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials {
            username: "judge".to_string(),
            password: "s3cret".to_string(),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("judge"));
        assert!(!shown.contains("s3cret"));
    }
}
