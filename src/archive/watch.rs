//! Observation of the browser's download side channel.
//!
//! The download itself happens inside the browser process: navigating to
//! the archive link makes Chrome drop a file with a fixed provisional name
//! into the download directory. This module models that side channel as an
//! explicit awaitable, separate from the navigation that triggers it, so
//! trigger and wait can be exercised independently.

use std::io;
use std::path::{Path, PathBuf};

use crate::session::Waiter;

/// The provisional file the browser writes before we claim it.
#[derive(Debug, Clone)]
pub struct ProvisionalFile {
    path: PathBuf,
}

impl ProvisionalFile {
    /// Provisional file location inside the browser's download directory.
    #[must_use]
    pub fn new(download_dir: &Path, name: &str) -> Self {
        Self {
            path: download_dir.join(name),
        }
    }

    /// Where the browser will drop the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes a leftover provisional file from an earlier run.
    ///
    /// A stale file would satisfy [`Self::await_appearance`] immediately
    /// with the wrong bytes, so it must be cleared before the download is
    /// triggered. Returns whether anything was removed.
    pub fn clear_stale(&self) -> io::Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Waits for the browser to finish the download.
    ///
    /// True once the provisional file exists; false if the deadline passed
    /// without it appearing.
    pub async fn await_appearance(&self, wait: &Waiter) -> bool {
        wait.file_exists(&self.path).await
    }

    /// Claims the finished download by renaming it to `target`.
    ///
    /// Rename only: the download directory and the target directory are
    /// the same, so no cross-device copy can be needed.
    pub fn promote(&self, target: &Path) -> io::Result<()> {
        std::fs::rename(&self.path, target)
    }
}
