//! CLI entry point for the portal-dl tool.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use portal_dl::{Credentials, PortalConfig, WebDriverSession};
use tracing::{debug, error, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("portal-dl starting");

    let output_dir = validate_output_dir(&args.output_dir)?;

    // Credentials are read interactively, used for this run only, and never
    // written to disk or to the logs.
    let username = prompt_nonempty("Username")?;
    let password = prompt_nonempty("Password")?;
    let credentials = Credentials::new(username, password);

    let config = PortalConfig {
        curriculum_year: args.year,
        ..PortalConfig::default()
    };

    info!(endpoint = %args.webdriver_url, "Booting browser session");
    let session = WebDriverSession::connect(&args.webdriver_url, &output_dir, args.headless)
        .await
        .context("could not start the browser; is chromedriver running at the --webdriver-url endpoint?")?;

    let outcome = portal_dl::run(&session, &credentials, &config, &output_dir).await;

    // Shut the browser down before reporting, whatever the run's outcome.
    if let Err(err) = session.quit().await {
        debug!(error = %err, "Browser session shutdown reported an error");
    }

    match outcome {
        Ok(stats) if stats.is_full_success() => {
            info!(
                saved = stats.saved(),
                skipped = stats.skipped(),
                total = stats.total(),
                "Done"
            );
            Ok(())
        }
        Ok(stats) => {
            error!(
                saved = stats.saved(),
                skipped = stats.skipped(),
                failed = stats.failed(),
                "Run finished with failed downloads"
            );
            std::process::exit(1);
        }
        Err(err) => {
            error!(error = %err, "Run aborted");
            std::process::exit(1);
        }
    }
}

/// Checks that the output directory exists and resolves it to an absolute path.
///
/// The directory is never created on the caller's behalf; chromedriver resolves
/// its download directory against its own working directory, so a relative path
/// would silently land the archives somewhere else.
fn validate_output_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        anyhow::bail!(
            "output directory '{}' does not exist or is not a directory",
            path.display()
        );
    }
    path.canonicalize()
        .with_context(|| format!("could not resolve output directory '{}'", path.display()))
}

/// Prompts on stdout and reads one non-empty line from stdin, re-prompting on
/// blank input.
///
/// Only the line terminator is stripped from the returned value; a secret with
/// leading or trailing spaces is submitted exactly as typed.
fn prompt_nonempty(label: &str) -> Result<String> {
    let stdin = io::stdin();
    loop {
        print!("{label}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = stdin.read_line(&mut line)?;
        if read == 0 {
            anyhow::bail!("stdin closed while waiting for {label}");
        }

        if !line.trim().is_empty() {
            return Ok(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }
}
