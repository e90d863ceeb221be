//! Service layer for talking to the judge.
//!
//! - `DomjudgeSession`: authenticated HTTP session against a DOMjudge server
//! - `PageScraper`: extraction of the fields that only exist in jury HTML
//! - `JudgeSession`: the operations the fetch pipeline needs from a session

mod domjudge;
mod pages;

#[cfg(test)]
pub(crate) mod mock_judge;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Submission;
use crate::storage::PartialFile;

pub use domjudge::{DomjudgeSession, check_login};
pub use pages::{PENDING_VERDICT, PageScraper};

/// Operations available once logged in to the judge.
#[async_trait]
pub trait JudgeSession: Send + Sync {
    /// All submissions visible to the jury account.
    async fn list_submissions(&self) -> Result<Vec<Submission>>;

    /// Verdict label of a submission.
    async fn fetch_verdict(&self, submission_id: &str) -> Result<String>;

    /// Source file names of a submission, in the judge's order.
    async fn list_source_files(&self, submission_id: &str) -> Result<Vec<String>>;

    /// Stream the source file at `file_index` into `sink`.
    async fn download_file(
        &self,
        submission_id: &str,
        file_index: usize,
        sink: &mut PartialFile,
    ) -> Result<()>;
}
