// src/models/mod.rs

//! Domain models for the fetcher.

mod config;
mod credentials;
mod submission;

pub use config::{Config, DownloadConfig, HttpConfig, RoutesConfig, SelectorConfig};
pub use credentials::Credentials;
pub use submission::{ProblemFilter, Submission};
