//! Storage for downloaded submission sources.

pub mod local;

pub use local::{PartialFile, SubmissionStore};
