//! Shared scripted browser session for integration tests.
//!
//! `ScriptedSession` emulates the portal from the pipeline's point of view:
//! registered pages answer the tag scans, click routes move the location the
//! way the real pages do, and registered downloads drop a file on disk when
//! their trigger URL is visited. No network or WebDriver endpoint is involved.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use portal_dl::{Session, SessionError};

/// Scan results one page answers with.
#[derive(Debug, Clone, Default)]
pub struct Page {
    hrefs: Vec<Option<String>>,
    headings: Vec<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn with_hrefs(mut self, hrefs: &[Option<&str>]) -> Self {
        self.hrefs = hrefs
            .iter()
            .map(|href| href.map(ToString::to_string))
            .collect();
        self
    }

    #[allow(dead_code)]
    pub fn with_headings(mut self, headings: &[&str]) -> Self {
        self.headings = headings.iter().map(ToString::to_string).collect();
        self
    }
}

#[derive(Debug, Default)]
struct State {
    location: String,
    visited: Vec<String>,
    typed: Vec<(String, String)>,
}

/// In-memory [`Session`] driven by a script of pages, click routes, and
/// downloads.
#[derive(Debug, Default)]
pub struct ScriptedSession {
    pages: HashMap<String, Page>,
    click_routes: HashMap<String, String>,
    downloads: HashMap<String, (PathBuf, Vec<u8>)>,
    unreachable: HashSet<String>,
    state: Mutex<State>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the scan results served while the browser sits on `url`.
    #[allow(dead_code)]
    pub fn with_page(mut self, url: &str, page: Page) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Registers a click on `id` as a navigation to `url`, emulating a
    /// page-driven redirect. Clicks on unrouted ids succeed without moving.
    #[allow(dead_code)]
    pub fn with_click_route(mut self, id: &str, url: &str) -> Self {
        self.click_routes.insert(id.to_string(), url.to_string());
        self
    }

    /// Registers `url` as a download trigger: visiting it writes `bytes` to
    /// `path`, emulating the browser dropping a finished file.
    #[allow(dead_code)]
    pub fn with_download(mut self, url: &str, path: PathBuf, bytes: &[u8]) -> Self {
        self.downloads.insert(url.to_string(), (path, bytes.to_vec()));
        self
    }

    /// Registers `url` as unreachable: navigating there is recorded but the
    /// location stays put, so a wait on it can only time out.
    #[allow(dead_code)]
    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    /// URLs explicitly navigated to, in order. Click-driven redirects are
    /// not included.
    #[allow(dead_code)]
    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    /// `(element id, text)` pairs typed so far, in order.
    #[allow(dead_code)]
    pub fn typed(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().typed.clone()
    }

    fn move_to(&self, url: &str) {
        self.state.lock().unwrap().location = url.to_string();
        if let Some((path, bytes)) = self.downloads.get(url) {
            fs::write(path, bytes).unwrap();
        }
    }

    fn current_page(&self) -> Page {
        let location = self.state.lock().unwrap().location.clone();
        self.pages.get(&location).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.state.lock().unwrap().visited.push(url.to_string());
        if !self.unreachable.contains(url) {
            self.move_to(url);
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String, SessionError> {
        Ok(self.state.lock().unwrap().location.clone())
    }

    async fn collect_attr(
        &self,
        tag: &str,
        attr: &str,
    ) -> Result<Vec<Option<String>>, SessionError> {
        if tag == "a" && attr == "href" {
            Ok(self.current_page().hrefs)
        } else {
            Ok(Vec::new())
        }
    }

    async fn collect_text(&self, tag: &str) -> Result<Vec<String>, SessionError> {
        if tag == "h1" {
            Ok(self.current_page().headings)
        } else {
            Ok(Vec::new())
        }
    }

    async fn click(&self, id: &str) -> Result<(), SessionError> {
        let route = self.click_routes.get(id).cloned();
        if let Some(url) = route {
            self.move_to(&url);
        }
        Ok(())
    }

    async fn send_keys(&self, id: &str, text: &str) -> Result<(), SessionError> {
        self.state
            .lock()
            .unwrap()
            .typed
            .push((id.to_string(), text.to_string()));
        Ok(())
    }
}
