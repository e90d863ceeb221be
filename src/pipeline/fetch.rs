// src/pipeline/fetch.rs

//! Submission download pipeline.
//!
//! login → list → for each problem → for each submission → verdict →
//! source listing → for each file → download or skip. Strictly sequential.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{Config, Credentials, ProblemFilter, Submission};
use crate::services::{DomjudgeSession, JudgeSession};
use crate::storage::SubmissionStore;

/// What to fetch and where to put it.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Server base URL, e.g. `https://judge.example.org/domjudge`
    pub base_url: String,
    /// Problems to download, in processing order
    pub problems: ProblemFilter,
    /// Only keep records from this contest, when they report one
    pub contest: Option<String>,
    /// Root of the download tree
    pub output_dir: PathBuf,
}

/// Summary of a fetch run.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub submissions: usize,
    pub files_downloaded: usize,
    pub files_skipped: usize,
    pub bytes_downloaded: u64,
    pub failures: Vec<FileFailure>,
}

/// A source file that could not be downloaded.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub submission_id: String,
    pub path: PathBuf,
    pub message: String,
}

enum FileStatus {
    Downloaded(u64),
    Skipped,
}

/// Log in and download every selected submission.
pub async fn run_fetcher(
    config: &Config,
    credentials: &Credentials,
    request: &FetchRequest,
) -> Result<FetchOutcome> {
    let session = DomjudgeSession::login(&request.base_url, config, credentials).await?;
    log::info!(
        "Downloading submissions for problems {:?}",
        request.problems.iter().collect::<Vec<_>>()
    );

    let store = SubmissionStore::new(&request.output_dir, config.download.chunk_size);
    fetch_submissions(&session, &request.problems, request.contest.as_deref(), &store).await
}

/// Download the selected submissions through an authenticated session.
pub async fn fetch_submissions<S>(
    session: &S,
    problems: &ProblemFilter,
    contest: Option<&str>,
    store: &SubmissionStore,
) -> Result<FetchOutcome>
where
    S: JudgeSession + ?Sized,
{
    let records = session.list_submissions().await?;
    log::info!(
        "Got {} submissions, filtering for {:?}",
        records.len(),
        problems.iter().collect::<Vec<_>>()
    );

    let groups = group_by_problem(records, problems, contest)?;
    let mut outcome = FetchOutcome::default();

    for (problem_id, submissions) in &groups {
        log::info!(
            "Found {} submissions for problem {}",
            submissions.len(),
            problem_id
        );
        for submission in submissions {
            fetch_submission(session, submission, store, &mut outcome).await?;
            outcome.submissions += 1;
        }
    }

    log::info!(
        "Processed {} submissions: {} files downloaded ({} bytes), {} skipped, {} failed",
        outcome.submissions,
        outcome.files_downloaded,
        outcome.bytes_downloaded,
        outcome.files_skipped,
        outcome.failures.len()
    );
    Ok(outcome)
}

/// Keep the records of the selected problems, grouped in filter order.
///
/// Arrival order is preserved inside each group. Records that report a
/// contest other than `contest` are dropped. Every selected problem must end
/// up with at least one submission.
pub fn group_by_problem(
    records: Vec<Submission>,
    problems: &ProblemFilter,
    contest: Option<&str>,
) -> Result<Vec<(String, Vec<Submission>)>> {
    let mut by_problem: HashMap<String, Vec<Submission>> = HashMap::new();
    for record in records {
        if !problems.contains(&record.problem_id) {
            continue;
        }
        if let (Some(wanted), Some(actual)) = (contest, record.contest_id.as_deref()) {
            if wanted != actual {
                continue;
            }
        }
        by_problem
            .entry(record.problem_id.clone())
            .or_default()
            .push(record);
    }

    problems
        .iter()
        .map(|problem_id| {
            by_problem
                .remove(problem_id)
                .map(|subs| (problem_id.to_string(), subs))
                .ok_or_else(|| {
                    AppError::not_found(format!("no submissions for problem {problem_id}"))
                })
        })
        .collect()
}

/// Fetch verdict and sources of one submission.
async fn fetch_submission<S>(
    session: &S,
    submission: &Submission,
    store: &SubmissionStore,
    outcome: &mut FetchOutcome,
) -> Result<()>
where
    S: JudgeSession + ?Sized,
{
    log::info!(
        "Downloading submission {} (problem {}, team {}, {})",
        submission.id,
        submission.problem_id,
        submission.team_id,
        submission.time
    );

    let verdict = session.fetch_verdict(&submission.id).await?;
    log::info!("Verdict: {}", verdict);

    let dir = store.submission_dir(submission, &verdict);
    store.ensure_dir(&dir).await?;

    let files = session.list_source_files(&submission.id).await?;
    for (index, filename) in files.iter().enumerate() {
        match download_file(session, &submission.id, index, &dir, filename, store).await {
            Ok(FileStatus::Downloaded(bytes)) => {
                outcome.files_downloaded += 1;
                outcome.bytes_downloaded += bytes;
            }
            Ok(FileStatus::Skipped) => outcome.files_skipped += 1,
            Err(e) => {
                let path = dir.join(filename);
                log::warn!("Failed! {} -> {}: {}", submission.id, path.display(), e);
                outcome.failures.push(FileFailure {
                    submission_id: submission.id.clone(),
                    path,
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Download one source file unless it is already on disk.
async fn download_file<S>(
    session: &S,
    submission_id: &str,
    file_index: usize,
    dir: &Path,
    filename: &str,
    store: &SubmissionStore,
) -> Result<FileStatus>
where
    S: JudgeSession + ?Sized,
{
    let path = store.file_path(dir, filename)?;
    if store.is_complete(&path).await {
        log::debug!("Skipping existing {}", path.display());
        return Ok(FileStatus::Skipped);
    }

    log::info!("GET {}#{} -> {}", submission_id, file_index, path.display());
    let mut sink = store.create_partial(&path).await?;
    match session.download_file(submission_id, file_index, &mut sink).await {
        Ok(()) => Ok(FileStatus::Downloaded(sink.commit().await?)),
        Err(e) => {
            sink.discard().await;
            Err(e)
        }
    }
}
