//! Course discovery on the curriculum listing.
//!
//! After authentication the curriculum page for one academic year lists
//! every enrolled course as a hyperlink. A link counts as a course when its
//! target carries the course marker; the links collapse into a set keyed by
//! the full reference string, so duplicates on the page cost nothing
//! downstream.

use std::collections::BTreeSet;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::PortalConfig;
use crate::session::{Session, SessionError};

/// A unique navigable reference to one course's home page.
///
/// Carries the course identifier extracted from the reference itself: the
/// token following the course marker. Ordered by URL, so a set of refs has
/// a stable iteration order within one run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CourseRef {
    url: String,
    id: String,
}

impl CourseRef {
    /// Parses an href into a course reference.
    ///
    /// Accepts the href iff it contains `marker`; the course identifier is
    /// everything after the first occurrence of the marker.
    #[must_use]
    pub fn parse(href: &str, marker: &str) -> Option<Self> {
        let id_start = href.find(marker)? + marker.len();
        Some(Self {
            url: href.to_string(),
            id: href[id_start..].to_string(),
        })
    }

    /// Full URL of the course home page.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Course identifier (the token after the course marker).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// URL of the course's document area, derived by substituting the home
    /// segment throughout the reference.
    #[must_use]
    pub fn documents_url(&self, home_segment: &str, documents_segment: &str) -> String {
        self.url.replace(home_segment, documents_segment)
    }
}

/// Filters a page's href list down to the set of qualifying course
/// references.
///
/// Pure: depends only on its inputs, so it is testable without a session.
/// Duplicate hrefs collapse through set semantics.
#[must_use]
pub fn collect_course_refs(hrefs: &[Option<String>], marker: &str) -> BTreeSet<CourseRef> {
    hrefs
        .iter()
        .flatten()
        .filter_map(|href| CourseRef::parse(href, marker))
        .collect()
}

/// Errors from course discovery.
#[derive(Debug, Clone, Error)]
pub enum EnumerateError {
    /// The curriculum listing never confirmed loading.
    #[error("curriculum listing {url} did not load within {waited:?}")]
    Timeout {
        /// Listing URL that was requested
        url: String,
        /// How long the load was awaited
        waited: Duration,
    },

    /// The browser session failed mid-discovery.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Collects the set of distinct courses reachable from the curriculum
/// listing of the configured year.
///
/// An empty set is not an error; it just means zero downstream work.
pub async fn enumerate(
    session: &dyn Session,
    config: &PortalConfig,
) -> Result<BTreeSet<CourseRef>, EnumerateError> {
    let url = config.curriculum_url();
    info!(url = %url, "Collecting enrolled courses");
    session.goto(&url).await?;
    if !config
        .nav_wait()
        .location_contains(session, &config.curriculum_marker)
        .await?
    {
        return Err(EnumerateError::Timeout {
            url,
            waited: config.nav_timeout,
        });
    }

    let hrefs = session.collect_attr("a", "href").await?;
    let courses = collect_course_refs(&hrefs, &config.course_marker);
    debug!(
        links = hrefs.len(),
        courses = courses.len(),
        "Link scan complete"
    );
    Ok(courses)
}
