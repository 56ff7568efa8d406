//! Portal Archive Downloader Core Library
//!
//! This library provides the core functionality for the portal-dl tool,
//! which logs into a university portal through its federated identity
//! provider and downloads every enrolled course's document archive.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Portal endpoints, page markers, and timing knobs
//! - [`session`] - Browser session abstraction, WebDriver adapter, polling waits
//! - [`auth`] - Federated login flow through the identity provider
//! - [`courses`] - Curriculum scraping and course reference collection
//! - [`archive`] - Per-course archive download, naming, and file promotion
//! - [`pipeline`] - End-to-end run orchestration and outcome accounting

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod auth;
pub mod config;
pub mod courses;
pub mod pipeline;
pub mod session;

// Re-export commonly used types
pub use archive::{
    ArchiveFetcher, FetchError, FetchOutcome, ProvisionalFile, archive_filename,
    sanitize_course_name,
};
pub use auth::{AuthError, Credentials, authenticate};
pub use config::{DEFAULT_YEAR, PortalConfig};
pub use courses::{CourseRef, EnumerateError, collect_course_refs, enumerate};
pub use pipeline::{PipelineError, RunStats, run};
pub use session::{Session, SessionError, Waiter, WebDriverSession};
