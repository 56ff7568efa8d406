//! Browser-automation session abstraction.
//!
//! The pipeline never talks to a WebDriver endpoint directly. It consumes
//! the [`Session`] trait, which narrows browser automation to the handful of
//! capabilities the portal flow needs: navigation, location inspection,
//! tag-wide attribute and text scans, and element actuation by id. Tests
//! supply scripted in-memory sessions; production wires in
//! [`WebDriverSession`].
//!
//! Exactly one session exists per run. It is created before authentication,
//! shared by reference through every stage, and quit only at process exit.

mod wait;
mod webdriver;

pub use wait::Waiter;
pub use webdriver::WebDriverSession;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a browser session.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A required element is not present on the current page.
    #[error("no element with id '{id}' on the current page: {message}")]
    ElementNotFound {
        /// Id the page was searched for
        id: String,
        /// Driver-reported detail
        message: String,
    },

    /// The WebDriver endpoint failed or rejected a command.
    #[error("webdriver command failed: {message}")]
    Driver {
        /// Driver-reported detail
        message: String,
    },
}

impl SessionError {
    /// Creates an `ElementNotFound` error for a missing element id.
    #[must_use]
    pub fn element_not_found(id: &str, message: impl Into<String>) -> Self {
        Self::ElementNotFound {
            id: id.to_string(),
            message: message.into(),
        }
    }

    /// Creates a `Driver` error from any endpoint failure.
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

/// One live browser context, shared by every pipeline stage.
///
/// All methods operate on whatever page the browser is currently showing;
/// callers are responsible for confirming navigation (via [`Waiter`])
/// before scanning or actuating.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigates the browser to `url`.
    async fn goto(&self, url: &str) -> Result<(), SessionError>;

    /// Returns the browser's current location.
    async fn current_url(&self) -> Result<String, SessionError>;

    /// Returns the value of `attr` for every element with tag `tag`, in
    /// document order. Elements lacking the attribute yield `None`.
    async fn collect_attr(
        &self,
        tag: &str,
        attr: &str,
    ) -> Result<Vec<Option<String>>, SessionError>;

    /// Returns the visible text of every element with tag `tag`, in
    /// document order.
    async fn collect_text(&self, tag: &str) -> Result<Vec<String>, SessionError>;

    /// Clicks the element with the given id.
    async fn click(&self, id: &str) -> Result<(), SessionError>;

    /// Types `text` into the element with the given id.
    async fn send_keys(&self, id: &str, text: &str) -> Result<(), SessionError>;
}
