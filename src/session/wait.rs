//! Bounded polling, the only suspension primitive in the pipeline.
//!
//! Every wait in the portal flow has the same shape: probe a condition,
//! sleep a fixed interval, give up at a deadline. [`Waiter`] captures that
//! shape once, so the login redirects, the page-load confirmations, and the
//! half-hour archive-generation wait all share one clock discipline and run
//! unchanged against tokio's paused test clock.

use std::path::Path;
use std::time::Duration;

use tokio::time::Instant;

use super::{Session, SessionError};

/// A bounded poll: deadline plus probe interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waiter {
    /// Total time the condition may take before the wait gives up.
    pub timeout: Duration,
    /// Pause between consecutive probes.
    pub poll_interval: Duration,
}

impl Waiter {
    /// Creates a waiter with the given deadline and probe interval.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Polls until the session's location contains `needle`.
    ///
    /// Returns `Ok(true)` when the location matched before the deadline,
    /// `Ok(false)` when the deadline passed first. Probe failures surface
    /// immediately.
    pub async fn location_contains(
        &self,
        session: &dyn Session,
        needle: &str,
    ) -> Result<bool, SessionError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if session.current_url().await?.contains(needle) {
                return Ok(true);
            }
            if !self.sleep_before(deadline).await {
                return Ok(false);
            }
        }
    }

    /// Polls until `path` exists on disk.
    ///
    /// True when the file appeared before the deadline. The final probe
    /// happens at the deadline itself, so a file landing within the bound
    /// is never missed by an off-by-one-interval gap.
    pub async fn file_exists(&self, path: &Path) -> bool {
        let deadline = Instant::now() + self.timeout;
        loop {
            if path.exists() {
                return true;
            }
            if !self.sleep_before(deadline).await {
                return false;
            }
        }
    }

    /// Sleeps one poll interval, clamped to the deadline. False once the
    /// deadline has been reached.
    async fn sleep_before(&self, deadline: Instant) -> bool {
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        true
    }
}
