//! Portal configuration threaded through every pipeline stage.
//!
//! All portal knowledge lives here: page addresses, federated-login element
//! ids, link markers, and wait bounds. Components receive a `&PortalConfig`
//! instead of reading ambient state, so tests can shorten timeouts and
//! repoint URLs freely.

use std::time::Duration;

use crate::session::Waiter;

/// Bound for page-navigation waits (10 seconds).
pub const NAV_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound for the archive-generation wait (30 minutes). The portal builds
/// course archives on demand; latency is unbounded but practically capped.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(1800);

/// Poll interval shared by all waits (500 ms).
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Academic year the curriculum listing defaults to.
pub const DEFAULT_YEAR: u16 = 2019;

/// Fixed addresses, element ids, markers, and timing bounds of the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Root page of the portal; login starts here.
    pub portal_url: String,
    /// Domain substring confirming the session returned to the portal.
    pub portal_domain: String,
    /// Domain substring of the federated identity provider.
    pub idp_domain: String,
    /// Element id of the portal control that starts the login redirect.
    pub login_button_id: String,
    /// Element id of the identity provider's identifier field.
    pub username_field_id: String,
    /// Element id of the identity provider's secret field.
    pub password_field_id: String,
    /// Element id of the identity provider's submit control.
    pub submit_button_id: String,
    /// Path of the curriculum listing, relative to `portal_url`.
    pub curriculum_path: String,
    /// Academic year the curriculum listing is requested for.
    pub curriculum_year: u16,
    /// Location substring confirming the curriculum listing loaded.
    pub curriculum_marker: String,
    /// Href substring identifying a link as a course home page.
    pub course_marker: String,
    /// Path segment replaced when deriving a course's document area.
    pub home_segment: String,
    /// Replacement segment addressing the document area.
    pub documents_segment: String,
    /// Href substring identifying the archive download link.
    pub archive_link_marker: String,
    /// Brand token excluded when resolving a course's display name,
    /// compared case-insensitively.
    pub brand_token: String,
    /// Fixed name the browser assigns to a downloaded archive.
    pub provisional_name: String,
    /// Bound for page-navigation waits.
    pub nav_timeout: Duration,
    /// Bound for the archive-generation wait.
    pub download_timeout: Duration,
    /// Poll interval shared by all waits.
    pub poll_interval: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            portal_url: "https://minerva.ugent.be/".to_string(),
            portal_domain: "minerva.ugent.be".to_string(),
            idp_domain: "login.ugent.be".to_string(),
            login_button_id: "btn_logincas".to_string(),
            username_field_id: "username".to_string(),
            password_field_id: "user_pass".to_string(),
            submit_button_id: "wp-submit".to_string(),
            curriculum_path: "main/curriculum/index.php".to_string(),
            curriculum_year: DEFAULT_YEAR,
            curriculum_marker: "curriculum".to_string(),
            course_marker: "course_home.php?cidReq=".to_string(),
            home_segment: "course_home".to_string(),
            documents_segment: "document".to_string(),
            archive_link_marker: "downloadfolder".to_string(),
            brand_token: "minerva".to_string(),
            provisional_name: "documents.zip".to_string(),
            nav_timeout: NAV_TIMEOUT,
            download_timeout: DOWNLOAD_TIMEOUT,
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl PortalConfig {
    /// Full URL of the curriculum listing for the configured year.
    #[must_use]
    pub fn curriculum_url(&self) -> String {
        format!(
            "{}{}?year={}",
            self.portal_url, self.curriculum_path, self.curriculum_year
        )
    }

    /// Waiter for page-navigation confirmation.
    #[must_use]
    pub fn nav_wait(&self) -> Waiter {
        Waiter::new(self.nav_timeout, self.poll_interval)
    }

    /// Waiter for archive generation (the long download wait).
    #[must_use]
    pub fn download_wait(&self) -> Waiter {
        Waiter::new(self.download_timeout, self.poll_interval)
    }
}
