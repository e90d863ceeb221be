//! Local filesystem layout for downloaded submissions.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! └── {problem_id}/
//!     └── {team_id}/
//!         └── {submission_id}_{date}_{team_id}_{verdict}/
//!             ├── main.cpp
//!             └── util.h
//! ```
//!
//! Files are written to `{name}.part` and renamed once complete, so a file
//! that exists under its final name is always a finished download.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{AppError, Result};
use crate::models::Submission;

/// Download tree rooted at a local directory.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    root_dir: PathBuf,
    chunk_size: usize,
}

impl SubmissionStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, chunk_size: usize) -> Self {
        Self {
            root_dir: root_dir.into(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Directory for one submission: `problem/team/id_date_team_verdict`.
    pub fn submission_dir(&self, submission: &Submission, verdict: &str) -> PathBuf {
        self.root_dir
            .join(sanitize_component(&submission.problem_id))
            .join(sanitize_component(&submission.team_id))
            .join(sanitize_component(&submission.directory_name(verdict)))
    }

    /// Create a directory and its parents if missing.
    pub async fn ensure_dir(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path).await?;
        Ok(())
    }

    /// Path of a source file inside a submission directory.
    ///
    /// Names that are not a single plain path component are rejected.
    pub fn file_path(&self, dir: &Path, filename: &str) -> Result<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(dir.join(name)),
            _ => Err(AppError::validation(format!(
                "unsafe source file name '{filename}'"
            ))),
        }
    }

    /// Whether a finished file already exists at `path`.
    pub async fn is_complete(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    /// Open a temporary file that becomes `path` on commit.
    pub async fn create_partial(&self, path: &Path) -> Result<PartialFile> {
        let tmp = partial_path(path);
        let file = File::create(&tmp).await?;
        Ok(PartialFile {
            target: path.to_path_buf(),
            tmp,
            writer: BufWriter::with_capacity(self.chunk_size, file),
            written: 0,
        })
    }
}

/// A download in progress.
pub struct PartialFile {
    target: PathBuf,
    tmp: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl PartialFile {
    /// Append a chunk of the body.
    pub async fn write_chunk(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).await?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Flush and move the file to its final name. Returns the byte count.
    pub async fn commit(mut self) -> Result<u64> {
        self.writer.flush().await?;
        self.writer.get_mut().sync_all().await?;
        drop(self.writer);

        tokio::fs::rename(&self.tmp, &self.target).await?;
        Ok(self.written)
    }

    /// Drop the temporary file.
    pub async fn discard(self) {
        drop(self.writer);
        if let Err(e) = tokio::fs::remove_file(&self.tmp).await {
            log::debug!("Could not remove {}: {}", self.tmp.display(), e);
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(".part");
    path.with_file_name(name)
}

/// Make a remote identifier usable as a single directory name.
fn sanitize_component(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}
