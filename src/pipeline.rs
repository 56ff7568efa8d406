//! Sequential orchestration of the whole run.
//!
//! Order is fixed: authentication completes before discovery, the full
//! course set is known before the first download, and courses are fetched
//! one at a time in set order over the single shared session. Per-course
//! failures are tallied and the run continues; failures that invalidate
//! the whole run abort it immediately.

use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::archive::{ArchiveFetcher, FetchError, FetchOutcome};
use crate::auth::{self, AuthError, Credentials};
use crate::config::PortalConfig;
use crate::courses::{self, EnumerateError};
use crate::session::Session;

/// Outcome tally of one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    saved: usize,
    skipped: usize,
    failed: usize,
}

impl RunStats {
    /// Courses whose archive was downloaded this run.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.saved
    }

    /// Courses skipped because their archive was already on disk.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Courses whose fetch failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Total courses processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.failed
    }

    /// True when every course ended saved or already present.
    #[must_use]
    pub fn is_full_success(&self) -> bool {
        self.failed == 0
    }
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The login handshake failed; no course work was attempted.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Course discovery failed.
    #[error("course discovery failed: {0}")]
    Enumerate(#[from] EnumerateError),

    /// A fetch failure that invalidates the whole run.
    #[error("archive fetch aborted the run: {0}")]
    Fetch(#[from] FetchError),
}

/// Runs the whole pipeline over one session: authenticate, enumerate,
/// fetch every course.
///
/// Returns the tally of per-course outcomes; the caller decides the exit
/// status from it. Errors returned here mean the run stopped early and
/// remaining courses were never attempted.
pub async fn run(
    session: &dyn Session,
    credentials: &Credentials,
    config: &PortalConfig,
    output_dir: &Path,
) -> Result<RunStats, PipelineError> {
    info!("Authenticating with the portal");
    auth::authenticate(session, credentials, config).await?;

    let courses = courses::enumerate(session, config).await?;
    info!(count = courses.len(), "Found courses");

    let mut stats = RunStats::default();
    let fetcher = ArchiveFetcher::new(session, config, output_dir);
    for (index, course) in courses.iter().enumerate() {
        info!(
            current = index + 1,
            total = courses.len(),
            course = %course.id(),
            "Fetching course archive"
        );
        match fetcher.fetch(course).await {
            Ok(FetchOutcome::Saved { .. }) => stats.saved += 1,
            Ok(FetchOutcome::AlreadyPresent { .. }) => stats.skipped += 1,
            Err(err) if err.aborts_run() => return Err(err.into()),
            Err(err) => {
                error!(course = %course.id(), error = %err, "Course archive fetch failed");
                stats.failed += 1;
            }
        }
    }

    info!(
        saved = stats.saved,
        skipped = stats.skipped,
        failed = stats.failed,
        "Run complete"
    );
    Ok(stats)
}
