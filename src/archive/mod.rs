//! Per-course archive fetching.
//!
//! For each discovered course the fetcher walks one fixed route: course
//! home page, document area, archive-link and course-name resolution, then
//! either a skip (the archive is already on disk) or a browser download
//! followed by a rename of the provisional file into its final name.
//!
//! The download is the only step with real latency: the portal generates
//! the archive on demand, so the wait is bounded at half an hour rather
//! than the ten seconds used for page loads.

mod error;
mod filename;
mod watch;

pub use error::FetchError;
pub use filename::{archive_filename, sanitize_course_name};
pub use watch::ProvisionalFile;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::PortalConfig;
use crate::courses::CourseRef;
use crate::session::Session;

/// Terminal success states of one course fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The archive was downloaded and renamed into place.
    Saved {
        /// Final filename inside the output directory
        filename: String,
    },

    /// The archive was already on disk; nothing was downloaded.
    AlreadyPresent {
        /// Existing filename inside the output directory
        filename: String,
    },
}

/// Fetches course archives one at a time over a shared session.
pub struct ArchiveFetcher<'a> {
    session: &'a dyn Session,
    config: &'a PortalConfig,
    output_dir: &'a Path,
}

impl<'a> ArchiveFetcher<'a> {
    /// Creates a fetcher writing into `output_dir`.
    ///
    /// The directory must also be the browser's download directory: the
    /// provisional file is renamed in place, never copied across
    /// filesystems.
    #[must_use]
    pub fn new(session: &'a dyn Session, config: &'a PortalConfig, output_dir: &'a Path) -> Self {
        Self {
            session,
            config,
            output_dir,
        }
    }

    /// Fetches one course's archive.
    ///
    /// Strictly sequential: the single browser session serializes every
    /// navigation, so this must never run concurrently with itself.
    pub async fn fetch(&self, course: &CourseRef) -> Result<FetchOutcome, FetchError> {
        let nav = self.config.nav_wait();

        self.session.goto(course.url()).await?;
        if !nav.location_contains(self.session, course.url()).await? {
            return Err(FetchError::NavigationTimeout {
                url: course.url().to_string(),
                waited: nav.timeout,
            });
        }

        let documents_url = course.documents_url(
            &self.config.home_segment,
            &self.config.documents_segment,
        );
        self.session.goto(&documents_url).await?;
        if !nav.location_contains(self.session, &documents_url).await? {
            return Err(FetchError::NavigationTimeout {
                url: documents_url,
                waited: nav.timeout,
            });
        }

        let hrefs = self.session.collect_attr("a", "href").await?;
        let archive_link = find_archive_link(&hrefs, &self.config.archive_link_marker)
            .ok_or_else(|| FetchError::ArchiveLinkNotFound {
                url: documents_url.clone(),
            })?;

        let headings = self.session.collect_text("h1").await?;
        let course_name = resolve_course_name(&headings, &self.config.brand_token).ok_or_else(
            || FetchError::CourseNameUnresolved {
                url: documents_url.clone(),
            },
        )?;
        debug!(course = %course.id(), name = %course_name, "Resolved course name");

        let target_name = archive_filename(course.id(), &course_name);
        let target = self.output_dir.join(&target_name);
        if target.exists() {
            info!(file = %target_name, "Archive already present, skipping download");
            return Ok(FetchOutcome::AlreadyPresent {
                filename: target_name,
            });
        }

        let provisional = ProvisionalFile::new(self.output_dir, &self.config.provisional_name);
        match provisional.clear_stale() {
            Ok(true) => {
                warn!(
                    path = %provisional.path().display(),
                    "Removed stale provisional file from an earlier run"
                );
            }
            Ok(false) => {}
            Err(err) => return Err(FetchError::io(provisional.path(), err)),
        }

        self.session.goto(&archive_link).await?;
        info!(course = %course.id(), "Awaiting archive generation");
        let wait = self.config.download_wait();
        if !provisional.await_appearance(&wait).await {
            return Err(FetchError::DownloadTimeout {
                course_id: course.id().to_string(),
                waited: wait.timeout,
            });
        }

        provisional
            .promote(&target)
            .map_err(|err| FetchError::io(&target, err))?;
        info!(file = %target_name, "Saved course archive");
        Ok(FetchOutcome::Saved {
            filename: target_name,
        })
    }
}

/// First href containing the download-folder marker.
fn find_archive_link(hrefs: &[Option<String>], marker: &str) -> Option<String> {
    hrefs
        .iter()
        .flatten()
        .find(|href| href.contains(marker))
        .cloned()
}

/// Text of the first heading that does not carry the portal brand.
///
/// The brand comparison is case-insensitive; the returned heading keeps its
/// original casing (sanitization lowercases later).
fn resolve_course_name(headings: &[String], brand_token: &str) -> Option<String> {
    let brand = brand_token.to_lowercase();
    headings
        .iter()
        .find(|heading| !heading.to_lowercase().contains(&brand))
        .cloned()
}
