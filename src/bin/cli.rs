//! DOMjudge submission fetcher CLI
//!
//! Logs in with a jury account and downloads the sources of every submission
//! to the selected problems.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::builder::BoolishValueParser;
use domjudge_fetcher::{
    error::Result,
    models::{Config, Credentials, ProblemFilter},
    pipeline::{self, FetchOutcome, FetchRequest},
};

/// Download submissions for a set of problems from a DOMjudge server.
#[derive(Parser, Debug)]
#[command(name = "domjudge-fetcher", version, about)]
struct Cli {
    /// The URL of the DOMjudge server
    #[arg(long, default_value = "https://ed.fdi.ucm.es/domjudge")]
    url: String,

    /// Whether to verify the server's TLS certificate (overrides the config file)
    #[arg(long, alias = "verify_ssl", value_parser = BoolishValueParser::new())]
    verify_ssl: Option<bool>,

    /// JSON file with username & password for a jury account
    #[arg(long, default_value = "credentials.json")]
    credentials: PathBuf,

    /// Only keep submissions from this contest
    #[arg(long)]
    contest: Option<String>,

    /// Problem IDs to download (space or comma separated)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    problems: Vec<String>,

    /// Directory to download into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stdout)
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<FetchOutcome> {
    let mut config = Config::load_or_default(&cli.config);
    if let Some(verify_ssl) = cli.verify_ssl {
        config.http.verify_ssl = verify_ssl;
    }
    config.validate()?;

    let credentials = Credentials::load(&cli.credentials)?;
    let request = FetchRequest {
        base_url: cli.url,
        problems: ProblemFilter::new(
            cli.problems
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty()),
        ),
        contest: cli.contest,
        output_dir: cli.output,
    };

    pipeline::run_fetcher(&config, &credentials, &request).await
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.problems.iter().all(|p| p.trim().is_empty()) {
        log::error!("No problems specified. Use --problems to specify the problems to download.");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(outcome) => {
            for failure in &outcome.failures {
                log::warn!(
                    "Not downloaded: {} ({})",
                    failure.path.display(),
                    failure.message
                );
            }
            log::info!("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
