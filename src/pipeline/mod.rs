//! Pipeline entry points.
//!
//! - `run_fetcher`: Log in and download the selected submissions
//! - `fetch_submissions`: The download loop over an existing session

pub mod fetch;

pub use fetch::{
    FetchOutcome, FetchRequest, FileFailure, fetch_submissions, group_by_problem, run_fetcher,
};
