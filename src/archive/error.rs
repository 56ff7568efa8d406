//! Error types for per-course archive fetching.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::session::SessionError;

/// Errors from fetching one course's archive.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A course page never confirmed loading.
    #[error("course page {url} did not load within {waited:?}")]
    NavigationTimeout {
        /// Page that was requested
        url: String,
        /// How long the load was awaited
        waited: Duration,
    },

    /// The document area has no archive download link.
    #[error("no archive download link in document area {url}")]
    ArchiveLinkNotFound {
        /// Document area that was scanned
        url: String,
    },

    /// Every heading carried the portal brand; the course name is unknown.
    #[error("no usable course heading on {url}")]
    CourseNameUnresolved {
        /// Page whose headings were scanned
        url: String,
    },

    /// The portal did not generate the archive within the extended bound.
    #[error("archive for course {course_id} was not generated within {waited:?}")]
    DownloadTimeout {
        /// Course whose archive was awaited
        course_id: String,
        /// How long generation was awaited
        waited: Duration,
    },

    /// A filesystem operation on the downloaded archive failed.
    #[error("filesystem operation on {} failed: {source}", path.display())]
    Io {
        /// Affected path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The browser session failed mid-fetch.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl FetchError {
    /// Creates an `Io` error carrying the affected path.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this failure invalidates the whole run rather than just the
    /// current course.
    ///
    /// A missing download link signals a portal-wide UI change; a session
    /// failure means the browser itself is gone. Everything else is scoped
    /// to the course being fetched.
    #[must_use]
    pub fn aborts_run(&self) -> bool {
        matches!(self, Self::ArchiveLinkNotFound { .. } | Self::Session(_))
    }
}
